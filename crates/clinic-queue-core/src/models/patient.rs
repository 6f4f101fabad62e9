//! Patient visit models.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::registration::ValidatedRegistration;
use super::token::Token;

/// Queue status of a patient visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    /// Registered, waiting to be seen
    Waiting,
    /// With the doctor
    InProgress,
    /// Consultation finished (terminal)
    Completed,
}

impl PatientStatus {
    pub const ALL: [PatientStatus; 3] = [
        PatientStatus::Waiting,
        PatientStatus::InProgress,
        PatientStatus::Completed,
    ];

    /// Whether `to` is reachable from `self` in one step.
    ///
    /// Allowed edges: Waiting→InProgress, InProgress→Completed, Waiting→Completed.
    pub fn can_transition_to(&self, to: PatientStatus) -> bool {
        matches!(
            (self, to),
            (PatientStatus::Waiting, PatientStatus::InProgress)
                | (PatientStatus::InProgress, PatientStatus::Completed)
                | (PatientStatus::Waiting, PatientStatus::Completed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PatientStatus::Completed)
    }

    /// Display label, same as the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Waiting => "waiting",
            PatientStatus::InProgress => "in-progress",
            PatientStatus::Completed => "completed",
        }
    }

    /// Parse a display label (case-insensitive).
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single patient visit in the clinic queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    /// Opaque UUID, assigned once at registration
    pub id: String,
    /// Queue token, unique within the registry
    pub token: Token,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub address: Option<String>,
    /// Presenting complaint
    pub condition: String,
    pub status: PatientStatus,
    /// Registration timestamp (RFC 3339)
    pub registered_at: String,
    /// Consultation fee in whole currency units
    pub fee: u64,
    /// Latest saved prescription
    pub prescription: Option<String>,
}

impl PatientRecord {
    /// Build a waiting record from validated registration input.
    pub fn new(registration: ValidatedRegistration, token: Token, fee: u64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            token,
            name: registration.name,
            age: registration.age,
            gender: registration.gender,
            phone: registration.phone,
            address: registration.address,
            condition: registration.condition,
            status: PatientStatus::Waiting,
            registered_at: chrono::Utc::now().to_rfc3339(),
            fee,
            prescription: None,
        }
    }

    /// Registration time as shown on the dashboards, e.g. `09:30 AM`.
    pub fn display_time(&self) -> Option<String> {
        chrono::DateTime::parse_from_rfc3339(&self.registered_at)
            .ok()
            .map(|ts| ts.format("%I:%M %p").to_string())
    }

    /// Case-insensitive substring match on name or token.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.token.to_string().to_lowercase().contains(needle)
    }

    pub fn has_prescription(&self) -> bool {
        self.prescription.is_some()
    }
}
