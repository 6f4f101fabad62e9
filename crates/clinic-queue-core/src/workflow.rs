//! Doctor-side queue workflow.
//!
//! Tracks at most one selected patient (the cursor) and the prescription
//! draft typed for that patient. Status changes go through the closed
//! transition table on [`PatientStatus`]:
//!
//! ```text
//! Waiting ──► InProgress ──► Completed
//!    └──────────────────────────▲
//! ```

use std::sync::Arc;

use crate::error::{ClinicError, ClinicResult};
use crate::models::{PatientRecord, PatientStatus};
use crate::prescription::{PrescriptionAck, PrescriptionService};
use crate::registry::PatientRegistry;

pub struct QueueWorkflow {
    registry: Arc<PatientRegistry>,
    cursor: Option<String>,
    draft: String,
}

impl QueueWorkflow {
    pub fn new(registry: Arc<PatientRegistry>) -> Self {
        Self {
            registry,
            cursor: None,
            draft: String::new(),
        }
    }

    pub fn registry(&self) -> &PatientRegistry {
        &self.registry
    }

    /// Point the cursor at `id`, discarding the previous draft.
    ///
    /// An unknown id leaves the cursor and draft untouched.
    pub fn select(&mut self, id: &str) -> ClinicResult<PatientRecord> {
        let record = self.registry.find_by_id(id)?;
        self.cursor = Some(record.id.clone());
        self.draft.clear();
        tracing::debug!(token = %record.token, "Selected patient");
        Ok(record)
    }

    pub fn clear_selection(&mut self) {
        self.cursor = None;
        self.draft.clear();
    }

    /// Current state of the selected record, if any.
    pub fn selected(&self) -> ClinicResult<Option<PatientRecord>> {
        self.cursor
            .as_deref()
            .map(|id| self.registry.find_by_id(id))
            .transpose()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Move a patient to `status`, rejecting edges outside the table.
    pub fn set_status(&self, id: &str, status: PatientStatus) -> ClinicResult<PatientRecord> {
        self.registry.apply_transition(id, status)
    }

    /// Save the draft for the selected patient, then clear the selection.
    ///
    /// On error the selection and draft are kept so the doctor can retry.
    pub fn submit_prescription(&mut self) -> ClinicResult<PrescriptionAck> {
        let id = self
            .cursor
            .clone()
            .ok_or_else(|| ClinicError::NotFound("no patient selected".into()))?;

        let ack = PrescriptionService::new(&self.registry).save(&id, &self.draft)?;
        self.clear_selection();
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClinicConfig;
    use crate::error::ValidationError;

    fn setup_workflow() -> QueueWorkflow {
        let registry = PatientRegistry::with_demo_patients(&ClinicConfig::default()).unwrap();
        QueueWorkflow::new(Arc::new(registry))
    }

    fn id_of(workflow: &QueueWorkflow, token: &str) -> String {
        workflow.registry().find_by_token(token).unwrap().id
    }

    #[test]
    fn test_select_clears_previous_draft() {
        let mut workflow = setup_workflow();
        let john = id_of(&workflow, "T001");
        let robert = id_of(&workflow, "T003");

        workflow.select(&john).unwrap();
        workflow.set_draft("Paracetamol");
        workflow.select(&robert).unwrap();

        assert_eq!(workflow.selected_id(), Some(robert.as_str()));
        assert_eq!(workflow.draft(), "");
    }

    #[test]
    fn test_select_unknown_keeps_cursor() {
        let mut workflow = setup_workflow();
        let john = id_of(&workflow, "T001");
        workflow.select(&john).unwrap();
        workflow.set_draft("Rest");

        assert!(matches!(workflow.select("nope"), Err(ClinicError::NotFound(_))));
        assert_eq!(workflow.selected_id(), Some(john.as_str()));
        assert_eq!(workflow.draft(), "Rest");
    }

    #[test]
    fn test_status_transitions() {
        let workflow = setup_workflow();
        let john = id_of(&workflow, "T001");

        let record = workflow.set_status(&john, PatientStatus::InProgress).unwrap();
        assert_eq!(record.status, PatientStatus::InProgress);

        let err = workflow.set_status(&john, PatientStatus::Waiting).unwrap_err();
        assert_eq!(
            err,
            ClinicError::InvalidTransition {
                from: PatientStatus::InProgress,
                to: PatientStatus::Waiting,
            }
        );
        assert_eq!(
            workflow.registry().find_by_id(&john).unwrap().status,
            PatientStatus::InProgress
        );

        workflow.set_status(&john, PatientStatus::Completed).unwrap();
    }

    #[test]
    fn test_completed_is_terminal() {
        let workflow = setup_workflow();
        let emily = id_of(&workflow, "T004");

        for to in PatientStatus::ALL {
            assert!(matches!(
                workflow.set_status(&emily, to),
                Err(ClinicError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_waiting_can_skip_to_completed() {
        let workflow = setup_workflow();
        let robert = id_of(&workflow, "T003");
        let record = workflow.set_status(&robert, PatientStatus::Completed).unwrap();
        assert_eq!(record.status, PatientStatus::Completed);
    }

    #[test]
    fn test_set_status_unknown_patient() {
        let workflow = setup_workflow();
        assert!(matches!(
            workflow.set_status("ghost", PatientStatus::InProgress),
            Err(ClinicError::NotFound(_))
        ));
    }

    #[test]
    fn test_submit_prescription_clears_selection() {
        let mut workflow = setup_workflow();
        let jane = id_of(&workflow, "T002");

        workflow.select(&jane).unwrap();
        workflow.set_draft("Ibuprofen 400mg after meals");
        let ack = workflow.submit_prescription().unwrap();

        assert_eq!(ack.token.to_string(), "T002");
        assert!(workflow.selected().unwrap().is_none());
        assert_eq!(workflow.draft(), "");
        assert_eq!(
            workflow.registry().find_by_id(&jane).unwrap().prescription.as_deref(),
            Some("Ibuprofen 400mg after meals")
        );
    }

    #[test]
    fn test_submit_blank_draft_keeps_selection() {
        let mut workflow = setup_workflow();
        let jane = id_of(&workflow, "T002");
        workflow.select(&jane).unwrap();

        assert_eq!(
            workflow.submit_prescription().unwrap_err(),
            ClinicError::Validation(ValidationError::EmptyPrescription)
        );
        assert_eq!(workflow.selected_id(), Some(jane.as_str()));
    }

    #[test]
    fn test_submit_without_selection() {
        let mut workflow = setup_workflow();
        workflow.set_draft("Something");
        assert!(matches!(
            workflow.submit_prescription(),
            Err(ClinicError::NotFound(_))
        ));
    }
}
