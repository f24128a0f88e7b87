//! Evidence photo models and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vistoria_core::types::DbId;

/// A row from the `photos` table. `filename` is the sanitized, disambiguated
/// on-disk name; `original_filename` is kept for display only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub answer_id: DbId,
    pub filename: String,
    pub original_filename: String,
}

/// DTO for recording a photo attachment.
#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub answer_id: DbId,
    pub filename: String,
    pub original_filename: String,
}
