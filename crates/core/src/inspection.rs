//! Inspection record rules.
//!
//! An inspection moves through an implicit Created -> Submitted workflow;
//! the status is never stored, it is derived from the answer count.

use crate::error::CoreError;

/// Derived workflow status of an inspection.
///
/// `Submitted` is terminal: once any answer is recorded the inspection is
/// considered submitted and available for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionStatus {
    Created,
    Submitted,
}

impl InspectionStatus {
    /// Derive the status from the number of recorded answers.
    pub fn from_answer_count(count: i64) -> Self {
        if count > 0 {
            Self::Submitted
        } else {
            Self::Created
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Submitted => "submitted",
        }
    }
}

/// Validate the title of a new inspection: non-empty after trimming.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(
            "Inspection title must not be empty".to_string(),
        ));
    }
    Ok(())
}
