//! Reception dashboard statistics.

use serde::{Deserialize, Serialize};

use crate::error::{ClinicError, ClinicResult};

use super::patient::{PatientRecord, PatientStatus};

/// Counts and fee total over one consistent view of the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueSummary {
    pub total_patients: usize,
    pub waiting: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub total_fees: u64,
}

impl QueueSummary {
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a PatientRecord>,
    ) -> ClinicResult<Self> {
        records
            .into_iter()
            .try_fold(Self::default(), |mut summary, record| {
                summary.total_patients += 1;
                summary.total_fees = summary
                    .total_fees
                    .checked_add(record.fee)
                    .ok_or(ClinicError::FeeOverflow)?;
                match record.status {
                    PatientStatus::Waiting => summary.waiting += 1,
                    PatientStatus::InProgress => summary.in_progress += 1,
                    PatientStatus::Completed => summary.completed += 1,
                }
                Ok(summary)
            })
    }

    pub fn count(&self, status: PatientStatus) -> usize {
        match status {
            PatientStatus::Waiting => self.waiting,
            PatientStatus::InProgress => self.in_progress,
            PatientStatus::Completed => self.completed,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = QueueSummary::from_records(&Vec::<PatientRecord>::new()).unwrap();
        assert_eq!(summary, QueueSummary::default());
    }

    #[test]
    fn test_to_json_fields() {
        let summary = QueueSummary {
            total_patients: 2,
            waiting: 1,
            in_progress: 1,
            completed: 0,
            total_fees: 100,
        };
        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(json["total_patients"], 2);
        assert_eq!(json["total_fees"], 100);
        assert_eq!(summary.count(PatientStatus::InProgress), 1);
    }
}
