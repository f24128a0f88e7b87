//! Question catalog models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vistoria_core::types::DbId;

/// A row from the `questions` table: one weighted checklist item.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub text: String,
    pub weight: f64,
}

/// DTO for creating a question. `weight` defaults to 1.0 when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestion {
    pub text: String,
    pub weight: Option<f64>,
}
