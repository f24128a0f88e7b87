//! Repository for the `photos` table.

use sqlx::{SqliteConnection, SqlitePool};
use vistoria_core::types::DbId;

use crate::models::photo::{CreatePhoto, Photo};

/// Column list for `photos` queries.
const COLUMNS: &str = "id, answer_id, filename, original_filename";

/// Provides data access for evidence photos.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a photo record.
    pub async fn create(pool: &SqlitePool, dto: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (answer_id, filename, original_filename) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(dto.answer_id)
            .bind(&dto.filename)
            .bind(&dto.original_filename)
            .fetch_one(pool)
            .await
    }

    /// Insert a photo record inside an open transaction.
    pub async fn create_tx(
        conn: &mut SqliteConnection,
        dto: &CreatePhoto,
    ) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (answer_id, filename, original_filename) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(dto.answer_id)
            .bind(&dto.filename)
            .bind(&dto.original_filename)
            .fetch_one(conn)
            .await
    }

    /// List the photos attached to an answer, in attachment order.
    pub async fn list_for_answer(
        pool: &SqlitePool,
        answer_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE answer_id = $1 ORDER BY id");
        sqlx::query_as::<_, Photo>(&query)
            .bind(answer_id)
            .fetch_all(pool)
            .await
    }

    /// Look up a photo by its stored filename.
    pub async fn find_by_filename(
        pool: &SqlitePool,
        filename: &str,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE filename = $1");
        sqlx::query_as::<_, Photo>(&query)
            .bind(filename)
            .fetch_optional(pool)
            .await
    }
}
