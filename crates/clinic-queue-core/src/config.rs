//! Clinic session configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ClinicError, ClinicResult};

/// Application-level constants
pub const APP_NAME: &str = "Clinic Queue";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// First token number for an empty clinic (`T001`).
pub const DEFAULT_TOKEN_SEED: u32 = 1;

/// Flat consultation fee charged at registration.
pub const DEFAULT_CONSULTATION_FEE: u64 = 50;

/// Highest accepted `token_seed`; leaves room for billions of tokens.
pub const MAX_TOKEN_SEED: u32 = 1_000_000;

/// Highest accepted `consultation_fee`. Keeps fee totals within `u64` for any
/// number of tokens a session can issue.
pub const MAX_CONSULTATION_FEE: u64 = 1_000_000;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "clinic_queue_core=info,warn"
}

/// Per-session settings for a clinic registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClinicConfig {
    /// Sequence number of the first token issued
    pub token_seed: u32,
    /// Fee assigned to every registration
    pub consultation_fee: u64,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            token_seed: DEFAULT_TOKEN_SEED,
            consultation_fee: DEFAULT_CONSULTATION_FEE,
        }
    }
}

impl ClinicConfig {
    /// Parse a JSON object; missing keys fall back to defaults.
    pub fn from_json(json: &str) -> ClinicResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(ClinicError::Config("expected a JSON object".into()));
        }
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_token_seed(mut self, seed: u32) -> Self {
        self.token_seed = seed;
        self
    }

    pub fn validate(&self) -> ClinicResult<()> {
        if self.token_seed == 0 || self.token_seed > MAX_TOKEN_SEED {
            return Err(ClinicError::Config(format!(
                "token_seed must be between 1 and {}",
                MAX_TOKEN_SEED
            )));
        }
        if self.consultation_fee > MAX_CONSULTATION_FEE {
            return Err(ClinicError::Config(format!(
                "consultation_fee must be at most {}",
                MAX_CONSULTATION_FEE
            )));
        }
        Ok(())
    }
}
