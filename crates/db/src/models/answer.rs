//! Answer models and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vistoria_core::types::DbId;

use crate::models::photo::Photo;

/// A row from the `answers` table: one inspection's response to one question.
///
/// `response` holds the canonical wire string ("Conforme", "Não Conforme",
/// "N/A"); it is validated before insertion, never on the way out.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    pub id: DbId,
    pub inspection_id: DbId,
    pub question_id: DbId,
    pub response: String,
}

/// DTO for recording an answer.
#[derive(Debug, Clone)]
pub struct CreateAnswer {
    pub inspection_id: DbId,
    pub question_id: DbId,
    pub response: String,
}

/// Report row: an answer joined with its question's text and weight.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnswerDetail {
    pub id: DbId,
    pub question_id: DbId,
    pub question_text: String,
    pub weight: f64,
    pub response: String,
    #[sqlx(skip)]
    pub photos: Vec<Photo>,
}

/// Scoring input row: response paired with the question weight.
#[derive(Debug, Clone, FromRow)]
pub struct ScoredAnswerRow {
    pub response: String,
    pub weight: f64,
}
