//! Clinic Queue Core Library
//!
//! Patient registration, token queueing and prescription entry for a small
//! clinic. All state lives in memory for the length of a clinic session.
//!
//! # Architecture
//!
//! ```text
//!   Receptionist                                   Doctor
//!        │                                           │
//!  RegistrationForm ──validate──┐          select / set_status / draft
//!                               ▼                    │
//!                 ┌──────────────────────────┐       ▼
//!                 │     PatientRegistry      │◄── QueueWorkflow
//!                 │  RwLock<records + index> │       │
//!                 │  TokenAllocator (T###)   │◄── PrescriptionService
//!                 └────────────┬─────────────┘
//!                              │
//!                  list / search / QueueSummary
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (PatientRecord, Token, RegistrationForm, QueueSummary)
//! - [`registry`]: Session registry and token allocator
//! - [`workflow`]: Doctor cursor, drafts and status transitions
//! - [`prescription`]: Prescription persistence onto records
//! - [`session`]: Demo staff login
//! - [`config`]: Session configuration and constants

pub mod config;
pub mod error;
pub mod models;
pub mod prescription;
pub mod registry;
pub mod session;
pub mod workflow;

// Re-export commonly used types
pub use config::ClinicConfig;
pub use error::{ClinicError, ClinicResult, ValidationError};
pub use models::{PatientRecord, PatientStatus, QueueSummary, RegistrationForm, Token};
pub use prescription::{PrescriptionAck, PrescriptionService};
pub use registry::{PatientRegistry, TokenAllocator};
pub use session::{StaffRole, StaffSession};
pub use workflow::QueueWorkflow;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicFfiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ClinicError> for ClinicFfiError {
    fn from(e: ClinicError) -> Self {
        match e {
            ClinicError::Validation(v) => ClinicFfiError::Validation(v.to_string()),
            ClinicError::NotFound(what) => ClinicFfiError::NotFound(what),
            e @ ClinicError::InvalidTransition { .. } => {
                ClinicFfiError::InvalidTransition(e.to_string())
            }
            e @ (ClinicError::TokensExhausted | ClinicError::FeeOverflow) => {
                ClinicFfiError::Internal(e.to_string())
            }
            ClinicError::Config(msg) => ClinicFfiError::InvalidInput(msg),
            ClinicError::LockPoisoned(msg) => ClinicFfiError::Internal(msg),
        }
    }
}

impl From<serde_json::Error> for ClinicFfiError {
    fn from(e: serde_json::Error) -> Self {
        ClinicFfiError::Internal(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicFfiError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicFfiError::Internal(format!("Lock poisoned: {}", e))
    }
}

fn parse_status(label: &str) -> Result<PatientStatus, ClinicFfiError> {
    PatientStatus::parse(label)
        .ok_or_else(|| ClinicFfiError::InvalidInput(format!("unknown status: {}", label)))
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open an empty clinic session. `config_json` overrides the defaults.
#[uniffi::export]
pub fn open_clinic(config_json: Option<String>) -> Result<Arc<ClinicCore>, ClinicFfiError> {
    let config = match config_json {
        Some(json) => ClinicConfig::from_json(&json)?,
        None => ClinicConfig::default(),
    };
    Ok(Arc::new(ClinicCore::from_registry(PatientRegistry::new(
        &config,
    ))))
}

/// Open a clinic session pre-loaded with the demo patients.
#[uniffi::export]
pub fn open_demo_clinic() -> Result<Arc<ClinicCore>, ClinicFfiError> {
    let registry = PatientRegistry::with_demo_patients(&ClinicConfig::default())?;
    Ok(Arc::new(ClinicCore::from_registry(registry)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe clinic session for FFI.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    registry: Arc<PatientRegistry>,
    doctor: Mutex<QueueWorkflow>,
}

impl ClinicCore {
    pub fn from_registry(registry: PatientRegistry) -> Self {
        let registry = Arc::new(registry);
        Self {
            doctor: Mutex::new(QueueWorkflow::new(Arc::clone(&registry))),
            registry,
        }
    }
}

#[uniffi::export]
impl ClinicCore {
    // =========================================================================
    // Staff Operations
    // =========================================================================

    /// Demo login; `role` is `doctor` or `receptionist`.
    pub fn login(
        &self,
        email: String,
        password: String,
        role: String,
    ) -> Result<FfiStaffSession, ClinicFfiError> {
        let role = StaffRole::parse(&role)
            .ok_or_else(|| ClinicFfiError::InvalidInput(format!("unknown role: {}", role)))?;
        let session = StaffSession::login(&email, &password, role)?;
        Ok(session.into())
    }

    // =========================================================================
    // Reception Operations
    // =========================================================================

    /// Register a patient and issue a token.
    pub fn register_patient(
        &self,
        form: FfiRegistrationForm,
    ) -> Result<FfiPatient, ClinicFfiError> {
        let record = self.registry.register(&form.into())?;
        Ok(record.into())
    }

    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, ClinicFfiError> {
        let records = self.registry.list()?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    /// Search by name or token.
    pub fn search_patients(&self, term: String) -> Result<Vec<FfiPatient>, ClinicFfiError> {
        let records = self.registry.search(&term)?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub fn get_patient(&self, id: String) -> Result<FfiPatient, ClinicFfiError> {
        Ok(self.registry.find_by_id(&id)?.into())
    }

    pub fn get_patient_by_token(&self, token: String) -> Result<FfiPatient, ClinicFfiError> {
        Ok(self.registry.find_by_token(&token)?.into())
    }

    pub fn total_fees(&self) -> Result<u64, ClinicFfiError> {
        Ok(self.registry.total_fees()?)
    }

    pub fn count_by_status(&self, status: String) -> Result<u64, ClinicFfiError> {
        let status = parse_status(&status)?;
        Ok(self.registry.count_by_status(status)? as u64)
    }

    pub fn summary(&self) -> Result<FfiQueueSummary, ClinicFfiError> {
        Ok(self.registry.summary()?.into())
    }

    /// Dashboard summary as JSON.
    pub fn summary_json(&self) -> Result<String, ClinicFfiError> {
        Ok(self.registry.summary()?.to_json()?)
    }

    // =========================================================================
    // Doctor Operations
    // =========================================================================

    pub fn select_patient(&self, id: String) -> Result<FfiPatient, ClinicFfiError> {
        let mut doctor = self.doctor.lock()?;
        Ok(doctor.select(&id)?.into())
    }

    pub fn clear_selection(&self) -> Result<(), ClinicFfiError> {
        self.doctor.lock()?.clear_selection();
        Ok(())
    }

    pub fn selected_patient(&self) -> Result<Option<FfiPatient>, ClinicFfiError> {
        let doctor = self.doctor.lock()?;
        Ok(doctor.selected()?.map(|r| r.into()))
    }

    /// Replace the prescription draft for the selected patient.
    pub fn update_draft(&self, text: String) -> Result<(), ClinicFfiError> {
        self.doctor.lock()?.set_draft(text);
        Ok(())
    }

    /// Save the draft and clear the selection.
    pub fn submit_prescription(&self) -> Result<FfiPrescriptionAck, ClinicFfiError> {
        let mut doctor = self.doctor.lock()?;
        Ok(doctor.submit_prescription()?.into())
    }

    /// Save a prescription directly, without touching the selection.
    pub fn save_prescription(
        &self,
        patient_id: String,
        text: String,
    ) -> Result<FfiPrescriptionAck, ClinicFfiError> {
        let ack = PrescriptionService::new(&self.registry).save(&patient_id, &text)?;
        Ok(ack.into())
    }

    /// Change status; `status` is `waiting`, `in-progress` or `completed`.
    pub fn set_status(&self, id: String, status: String) -> Result<FfiPatient, ClinicFfiError> {
        let status = parse_status(&status)?;
        Ok(self.registry.apply_transition(&id, status)?.into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub token: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub address: Option<String>,
    pub condition: String,
    pub status: String,
    pub registered_at: String,
    pub display_time: Option<String>,
    pub fee: u64,
    pub prescription: Option<String>,
}

impl From<PatientRecord> for FfiPatient {
    fn from(record: PatientRecord) -> Self {
        Self {
            display_time: record.display_time(),
            id: record.id,
            token: record.token.to_string(),
            name: record.name,
            age: record.age,
            gender: record.gender,
            phone: record.phone,
            address: record.address,
            condition: record.condition,
            status: record.status.as_str().to_string(),
            registered_at: record.registered_at,
            fee: record.fee,
            prescription: record.prescription,
        }
    }
}

/// FFI-safe registration form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRegistrationForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub phone: String,
    pub address: Option<String>,
    pub condition: String,
}

impl From<FfiRegistrationForm> for RegistrationForm {
    fn from(form: FfiRegistrationForm) -> Self {
        RegistrationForm {
            name: form.name,
            age: form.age,
            gender: form.gender,
            phone: form.phone,
            address: form.address.unwrap_or_default(),
            condition: form.condition,
        }
    }
}

/// FFI-safe dashboard summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiQueueSummary {
    pub total_patients: u64,
    pub waiting: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub total_fees: u64,
}

impl From<QueueSummary> for FfiQueueSummary {
    fn from(summary: QueueSummary) -> Self {
        Self {
            total_patients: summary.total_patients as u64,
            waiting: summary.waiting as u64,
            in_progress: summary.in_progress as u64,
            completed: summary.completed as u64,
            total_fees: summary.total_fees,
        }
    }
}

/// FFI-safe prescription acknowledgement.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrescriptionAck {
    pub patient_id: String,
    pub token: String,
    pub prescription: String,
}

impl From<PrescriptionAck> for FfiPrescriptionAck {
    fn from(ack: PrescriptionAck) -> Self {
        Self {
            patient_id: ack.patient_id,
            token: ack.token.to_string(),
            prescription: ack.prescription,
        }
    }
}

/// FFI-safe staff session.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStaffSession {
    pub email: String,
    pub role: String,
    pub logged_in_at: String,
    pub welcome_message: String,
}

impl From<StaffSession> for FfiStaffSession {
    fn from(session: StaffSession) -> Self {
        Self {
            welcome_message: session.welcome_message(),
            email: session.email,
            role: session.role.as_str().to_string(),
            logged_in_at: session.logged_in_at,
        }
    }
}
