//! Inspection models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vistoria_core::inspection::InspectionStatus;
use vistoria_core::types::{DbId, Timestamp};

/// A row from the `inspections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inspection {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
}

/// Listing row: an inspection with its answer count and derived status.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionSummary {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub answer_count: i64,
    pub status: InspectionStatus,
}

/// DTO for creating an inspection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInspection {
    pub title: String,
}
