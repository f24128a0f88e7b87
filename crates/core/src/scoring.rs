//! Weighted compliance scoring.
//!
//! Each non-N/A answer contributes its question weight to the total; each
//! `Conforme` answer additionally contributes to the conforming share. The
//! score is the conforming percentage of the total weight.

use crate::error::CoreError;

/// The closed set of accepted response values.
///
/// The canonical wire strings ("Conforme", "Não Conforme", "N/A") are the
/// only values stored in the database; anything else is a data-entry error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResponseValue {
    #[serde(rename = "Conforme")]
    Conforme,
    #[serde(rename = "Não Conforme")]
    NaoConforme,
    #[serde(rename = "N/A")]
    NaoAplicavel,
}

impl ResponseValue {
    /// Parse a raw response string from a form submission.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "Conforme" => Ok(Self::Conforme),
            "Não Conforme" => Ok(Self::NaoConforme),
            "N/A" => Ok(Self::NaoAplicavel),
            other => Err(CoreError::Validation(format!(
                "Unknown response value '{other}'. Must be one of: Conforme, Não Conforme, N/A"
            ))),
        }
    }

    /// Canonical wire/database string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conforme => "Conforme",
            Self::NaoConforme => "Não Conforme",
            Self::NaoAplicavel => "N/A",
        }
    }
}

/// One answer paired with its question's weight, as input to the scorer.
#[derive(Debug, Clone, Copy)]
pub struct ScoredAnswer {
    pub response: ResponseValue,
    pub weight: f64,
}

/// Compute the weighted compliance score as a percentage in `[0, 100]`.
///
/// N/A answers are excluded from both sides of the ratio. When no weight
/// remains (no answers, or every answer N/A) the inspection is vacuously
/// fully compliant and the score is exactly `100.0`. Full f64 precision is
/// preserved; display rounding is the presentation layer's concern.
pub fn compliance_score(answers: &[ScoredAnswer]) -> f64 {
    let mut total_weight = 0.0;
    let mut conforming_weight = 0.0;

    for answer in answers {
        match answer.response {
            ResponseValue::NaoAplicavel => {}
            ResponseValue::Conforme => {
                total_weight += answer.weight;
                conforming_weight += answer.weight;
            }
            ResponseValue::NaoConforme => {
                total_weight += answer.weight;
            }
        }
    }

    if total_weight == 0.0 {
        100.0
    } else {
        conforming_weight / total_weight * 100.0
    }
}
