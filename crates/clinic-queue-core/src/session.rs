//! Staff login for the two dashboards.
//!
//! Demo-only gate: any non-empty email/password pair is accepted. There is
//! no credential check behind it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClinicResult, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Doctor,
    Receptionist,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Doctor => "doctor",
            StaffRole::Receptionist => "receptionist",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "doctor" => Some(StaffRole::Doctor),
            "receptionist" => Some(StaffRole::Receptionist),
            _ => None,
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged-in staff member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffSession {
    pub email: String,
    pub role: StaffRole,
    /// Login timestamp (RFC 3339)
    pub logged_in_at: String,
}

impl StaffSession {
    pub fn login(email: &str, password: &str, role: StaffRole) -> ClinicResult<Self> {
        let missing: Vec<String> = [("email", email), ("password", password)]
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing).into());
        }

        tracing::info!(%role, "Staff logged in");
        Ok(Self {
            email: email.trim().to_string(),
            role,
            logged_in_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Greeting shown after login.
    pub fn welcome_message(&self) -> String {
        format!("Welcome, {}!", self.role)
    }

    pub fn logout(self) {
        tracing::info!(role = %self.role, "Staff logged out");
    }
}
