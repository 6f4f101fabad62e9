//! Property tests for token allocation and fee totals.

use clinic_queue_core::{ClinicConfig, PatientRegistry, RegistrationForm};
use proptest::prelude::*;

fn form_strategy() -> impl Strategy<Value = RegistrationForm> {
    (
        "[A-Za-z]{0,8}( [A-Za-z]{1,8})?",
        prop_oneof![Just(String::new()), "[1-9][0-9]?", Just("0".to_string())],
        prop_oneof![Just("Male".to_string()), Just("Female".to_string()), Just(String::new())],
        "\\+?[0-9]{0,10}",
        "[A-Za-z ]{0,12}",
    )
        .prop_map(|(name, age, gender, phone, condition)| RegistrationForm {
            name,
            age,
            gender,
            phone,
            address: String::new(),
            condition,
        })
}

proptest! {
    #[test]
    fn tokens_unique_and_increasing(
        seed in 1u32..500,
        forms in prop::collection::vec(form_strategy(), 0..30),
    ) {
        let registry = PatientRegistry::new(&ClinicConfig::default().with_token_seed(seed));

        let mut last = None;
        let mut accepted = 0u32;
        for form in &forms {
            if let Ok(record) = registry.register(form) {
                if let Some(prev) = last {
                    prop_assert!(record.token > prev);
                }
                last = Some(record.token);
                accepted += 1;
            }
        }

        // Rejected forms never consume a token
        prop_assert_eq!(registry.allocator().peek().sequence(), seed + accepted);
        prop_assert_eq!(registry.len().unwrap(), accepted as usize);
    }

    #[test]
    fn total_fees_is_count_times_flat_fee(
        fee in 0u64..1_000,
        count in 0usize..20,
    ) {
        let config = ClinicConfig { token_seed: 1, consultation_fee: fee };
        let registry = PatientRegistry::new(&config);
        for i in 0..count {
            registry.register(&RegistrationForm {
                name: format!("Patient {}", i),
                age: "30".into(),
                gender: "Female".into(),
                phone: "+1234567890".into(),
                address: String::new(),
                condition: "Checkup".into(),
            }).unwrap();
        }

        prop_assert_eq!(registry.total_fees().unwrap(), count as u64 * fee);
        prop_assert_eq!(registry.search("").unwrap(), registry.list().unwrap());
    }
}
