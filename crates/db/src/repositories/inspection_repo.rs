//! Repository for the `inspections` table.

use sqlx::{FromRow, SqlitePool};
use vistoria_core::inspection::InspectionStatus;
use vistoria_core::types::{DbId, Timestamp};

use crate::models::inspection::{CreateInspection, Inspection, InspectionSummary};

/// Column list for `inspections` queries.
const COLUMNS: &str = "id, title, created_at";

/// Raw listing row before the derived status is attached.
#[derive(Debug, FromRow)]
struct SummaryRow {
    id: DbId,
    title: String,
    created_at: Timestamp,
    answer_count: i64,
}

/// Provides data access for inspections.
pub struct InspectionRepo;

impl InspectionRepo {
    /// Insert a new inspection with `created_at` set to the current time.
    pub async fn create(
        pool: &SqlitePool,
        dto: &CreateInspection,
    ) -> Result<Inspection, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspections (title, created_at) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(&dto.title)
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inspections WHERE id = $1");
        sqlx::query_as::<_, Inspection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all inspections, most recent first, with their answer counts.
    ///
    /// Ordering is strictly by creation timestamp descending; the id is a
    /// tie-breaker for rows created within the same instant.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<InspectionSummary>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            "SELECT i.id, i.title, i.created_at, COUNT(a.id) AS answer_count \
             FROM inspections i \
             LEFT JOIN answers a ON a.inspection_id = i.id \
             GROUP BY i.id \
             ORDER BY i.created_at DESC, i.id DESC",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| InspectionSummary {
                id: r.id,
                title: r.title,
                created_at: r.created_at,
                status: InspectionStatus::from_answer_count(r.answer_count),
                answer_count: r.answer_count,
            })
            .collect())
    }

    /// Delete an inspection and everything it owns, in one transaction.
    ///
    /// Cascade order: photos of its answers, then answers, then the
    /// inspection row. Returns the stored filenames of the deleted photos so
    /// the caller can remove the binaries, or `None` if the id is unknown.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<DbId> = sqlx::query_scalar("SELECT id FROM inspections WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let filenames: Vec<String> = sqlx::query_scalar(
            "SELECT p.filename FROM photos p \
             JOIN answers a ON a.id = p.answer_id \
             WHERE a.inspection_id = $1",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM photos WHERE answer_id IN \
             (SELECT id FROM answers WHERE inspection_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM answers WHERE inspection_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM inspections WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(filenames))
    }
}
