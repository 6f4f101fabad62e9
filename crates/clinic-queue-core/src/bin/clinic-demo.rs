//! Walks one patient through reception and the doctor's desk.

use std::sync::Arc;

use anyhow::Context;
use clinic_queue_core::config::{self, ClinicConfig};
use clinic_queue_core::{
    PatientRegistry, PatientStatus, QueueWorkflow, RegistrationForm, StaffRole, StaffSession,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} demo v{}", config::APP_NAME, config::APP_VERSION);

    let registry = Arc::new(
        PatientRegistry::with_demo_patients(&ClinicConfig::default())
            .context("seeding demo patients")?,
    );

    let reception = StaffSession::login("front@clinic.test", "demo", StaffRole::Receptionist)?;
    let record = registry.register(&RegistrationForm {
        name: "Alex Morgan".into(),
        age: "41".into(),
        gender: "Female".into(),
        phone: "+1234567894".into(),
        address: "22 Elm Street".into(),
        condition: "Sore throat".into(),
    })?;
    println!("Token {} assigned to {}", record.token, record.name);
    reception.logout();

    let doctor = StaffSession::login("dr@clinic.test", "demo", StaffRole::Doctor)?;
    let mut workflow = QueueWorkflow::new(Arc::clone(&registry));
    workflow.select(&record.id)?;
    workflow.set_status(&record.id, PatientStatus::InProgress)?;
    workflow.set_draft("Amoxicillin 500mg, three times daily for 7 days");
    let ack = workflow.submit_prescription()?;
    workflow.set_status(&record.id, PatientStatus::Completed)?;
    println!("Prescription saved for {}", ack.token);
    doctor.logout();

    let summary = registry.summary()?;
    println!("{}", summary.to_json().context("serializing summary")?);
    Ok(())
}
