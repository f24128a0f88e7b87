//! Question catalog rules.
//!
//! Questions are weighted checklist items reused across inspections; the
//! weight feeds directly into the compliance score, so a non-positive or
//! non-finite weight is rejected at input.

use crate::error::CoreError;

/// Weight assigned when the client does not provide one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Validate the fields of a new question.
///
/// - `text` must be non-empty after trimming.
/// - `weight` must be finite and strictly positive (a weight of 0 would
///   degenerate scoring, negative weights are meaningless).
pub fn validate_question(text: &str, weight: f64) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Question text must not be empty".to_string(),
        ));
    }
    validate_weight(weight)
}

/// Validate a question weight on its own.
pub fn validate_weight(weight: f64) -> Result<(), CoreError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(CoreError::Validation(format!(
            "Question weight must be a positive number, got {weight}"
        )));
    }
    Ok(())
}
