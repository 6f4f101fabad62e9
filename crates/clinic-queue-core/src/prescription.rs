//! Prescription entry for a patient visit.

use serde::{Deserialize, Serialize};

use crate::error::{ClinicResult, ValidationError};
use crate::models::Token;
use crate::registry::PatientRegistry;

/// Acknowledgement of a saved prescription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionAck {
    pub patient_id: String,
    pub token: Token,
    pub prescription: String,
}

/// Writes prescriptions onto registry records.
pub struct PrescriptionService<'a> {
    registry: &'a PatientRegistry,
}

impl<'a> PrescriptionService<'a> {
    pub fn new(registry: &'a PatientRegistry) -> Self {
        Self { registry }
    }

    /// Store `text` as the patient's prescription, replacing any earlier one.
    ///
    /// Blank text is rejected before the patient is looked up. Saving the
    /// same text again is a no-op that still succeeds.
    pub fn save(&self, patient_id: &str, text: &str) -> ClinicResult<PrescriptionAck> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyPrescription.into());
        }

        let record = self.registry.update_record(patient_id, |record| {
            record.prescription = Some(text.to_string());
            Ok(())
        })?;

        tracing::info!(token = %record.token, "Prescription saved");
        Ok(PrescriptionAck {
            patient_id: record.id,
            token: record.token,
            prescription: text.to_string(),
        })
    }
}
