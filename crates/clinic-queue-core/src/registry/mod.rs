//! In-memory patient registry for one clinic session.
//!
//! The registry owns every [`PatientRecord`] and the [`TokenAllocator`] that
//! numbers them. All state sits behind one `RwLock`: registration holds the
//! write lock across token allocation and insertion, so readers never see a
//! token without its record.

mod allocator;

pub use allocator::*;

use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::ClinicConfig;
use crate::error::{ClinicError, ClinicResult};
use crate::models::{PatientRecord, PatientStatus, QueueSummary, RegistrationForm, Token};

#[derive(Debug, Default)]
struct RegistryState {
    /// Insertion order, oldest first
    records: Vec<PatientRecord>,
    /// id -> position in `records`
    by_id: HashMap<String, usize>,
}

impl RegistryState {
    fn get(&self, id: &str) -> Option<&PatientRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut PatientRecord> {
        match self.by_id.get(id) {
            Some(&idx) => self.records.get_mut(idx),
            None => None,
        }
    }
}

/// Authoritative store of patient visits for a session.
#[derive(Debug)]
pub struct PatientRegistry {
    allocator: TokenAllocator,
    consultation_fee: u64,
    state: RwLock<RegistryState>,
}

impl PatientRegistry {
    pub fn new(config: &ClinicConfig) -> Self {
        Self {
            allocator: TokenAllocator::new(config.token_seed),
            consultation_fee: config.consultation_fee,
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Registry pre-loaded with the four demo patients (`T001`–`T004`).
    ///
    /// `config.token_seed` is ignored; the next token issued is `T005`.
    pub fn with_demo_patients(config: &ClinicConfig) -> ClinicResult<Self> {
        let registry = Self::new(&config.clone().with_token_seed(1));

        let demo = [
            ("John Doe", "35", "Male", "+1234567890", "Fever", (9, 30), PatientStatus::Waiting),
            ("Jane Smith", "28", "Female", "+1234567891", "Headache", (10, 0), PatientStatus::InProgress),
            ("Robert Johnson", "45", "Male", "+1234567892", "Back Pain", (10, 30), PatientStatus::Waiting),
            ("Emily Davis", "32", "Female", "+1234567893", "Cough", (11, 0), PatientStatus::Completed),
        ];

        let today = chrono::Utc::now().date_naive();
        for (name, age, gender, phone, condition, (hour, minute), status) in demo {
            let record = registry.register(&RegistrationForm {
                name: name.into(),
                age: age.into(),
                gender: gender.into(),
                phone: phone.into(),
                address: String::new(),
                condition: condition.into(),
            })?;

            let registered_at = today
                .and_hms_opt(hour, minute, 0)
                .map(|ts| ts.and_utc().to_rfc3339());
            registry.update_record(&record.id, |r| {
                if let Some(ts) = registered_at {
                    r.registered_at = ts;
                }
                Ok(())
            })?;

            if status != PatientStatus::Waiting {
                registry.apply_transition(&record.id, status)?;
            }
        }

        Ok(registry)
    }

    /// Validate and register a new patient.
    ///
    /// On failure nothing is stored and no token is consumed.
    pub fn register(&self, form: &RegistrationForm) -> ClinicResult<PatientRecord> {
        let registration = form.validate()?;

        let mut state = self.state.write()?;
        let token = self.allocator.next()?;
        let record = PatientRecord::new(registration, token, self.consultation_fee);

        let idx = state.records.len();
        state.by_id.insert(record.id.clone(), idx);
        state.records.push(record.clone());

        tracing::info!(token = %record.token, id = %record.id, "Registered patient");
        Ok(record)
    }

    /// All records, oldest registration first.
    pub fn list(&self) -> ClinicResult<Vec<PatientRecord>> {
        Ok(self.state.read()?.records.clone())
    }

    /// Case-insensitive substring search on name or token.
    ///
    /// A blank term returns every record. A term spelling out an issued
    /// token (`T100`) returns only that record, even once longer tokens
    /// such as `T1000` contain it.
    pub fn search(&self, term: &str) -> ClinicResult<Vec<PatientRecord>> {
        let needle = term.trim().to_lowercase();
        let state = self.state.read()?;

        if let Some(record) = state
            .records
            .iter()
            .find(|record| record.token.to_string().to_lowercase() == needle)
        {
            return Ok(vec![record.clone()]);
        }

        Ok(state
            .records
            .iter()
            .filter(|record| record.matches_lowercase(&needle))
            .cloned()
            .collect())
    }

    pub fn find_by_id(&self, id: &str) -> ClinicResult<PatientRecord> {
        self.state
            .read()?
            .get(id)
            .cloned()
            .ok_or_else(|| ClinicError::NotFound(format!("patient {}", id)))
    }

    /// Look up a record by its queue token (`t003` matches `T003`).
    pub fn find_by_token(&self, token: &str) -> ClinicResult<PatientRecord> {
        let wanted: Token = token.parse()?;
        self.state
            .read()?
            .records
            .iter()
            .find(|record| record.token == wanted)
            .cloned()
            .ok_or_else(|| ClinicError::NotFound(format!("token {}", token)))
    }

    pub fn total_fees(&self) -> ClinicResult<u64> {
        self.state
            .read()?
            .records
            .iter()
            .try_fold(0u64, |total, r| total.checked_add(r.fee))
            .ok_or(ClinicError::FeeOverflow)
    }

    pub fn count_by_status(&self, status: PatientStatus) -> ClinicResult<usize> {
        Ok(self
            .state
            .read()?
            .records
            .iter()
            .filter(|r| r.status == status)
            .count())
    }

    /// Totals and per-status counts from a single read.
    pub fn summary(&self) -> ClinicResult<QueueSummary> {
        QueueSummary::from_records(&self.state.read()?.records)
    }

    pub fn len(&self) -> ClinicResult<usize> {
        Ok(self.state.read()?.records.len())
    }

    pub fn is_empty(&self) -> ClinicResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn allocator(&self) -> &TokenAllocator {
        &self.allocator
    }

    pub fn consultation_fee(&self) -> u64 {
        self.consultation_fee
    }

    /// Move a record along the status state machine.
    pub(crate) fn apply_transition(
        &self,
        id: &str,
        to: PatientStatus,
    ) -> ClinicResult<PatientRecord> {
        self.update_record(id, |record| {
            let from = record.status;
            if !from.can_transition_to(to) {
                tracing::warn!(token = %record.token, %from, %to, "Rejected status transition");
                return Err(ClinicError::InvalidTransition { from, to });
            }
            record.status = to;
            tracing::info!(token = %record.token, %from, %to, "Patient status changed");
            Ok(())
        })
    }

    /// Mutate one record under the write lock.
    ///
    /// `apply` must check before it writes: an `Err` is returned as-is and
    /// whatever `apply` already changed stays changed.
    pub(crate) fn update_record<F>(&self, id: &str, apply: F) -> ClinicResult<PatientRecord>
    where
        F: FnOnce(&mut PatientRecord) -> ClinicResult<()>,
    {
        let mut state = self.state.write()?;
        let record = state
            .get_mut(id)
            .ok_or_else(|| ClinicError::NotFound(format!("patient {}", id)))?;
        apply(record)?;
        Ok(record.clone())
    }
}
