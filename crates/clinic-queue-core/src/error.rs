//! Error types shared by the registry, workflow and prescription layers.

use thiserror::Error;

use crate::models::PatientStatus;

/// Input rejected before any state change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Prescription text is empty")]
    EmptyPrescription,

    #[error("Age must be a positive whole number, got {0:?}")]
    InvalidAge(String),
}

/// Errors returned by clinic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClinicError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: PatientStatus,
        to: PatientStatus,
    },

    #[error("Token sequence exhausted")]
    TokensExhausted,

    #[error("Fee total exceeds {}", u64::MAX)]
    FeeOverflow,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

pub type ClinicResult<T> = Result<T, ClinicError>;

impl<T> From<std::sync::PoisonError<T>> for ClinicError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicError::LockPoisoned(e.to_string())
    }
}

impl From<serde_json::Error> for ClinicError {
    fn from(e: serde_json::Error) -> Self {
        ClinicError::Config(e.to_string())
    }
}
