//! Repository for the `questions` table.

use sqlx::SqlitePool;
use vistoria_core::types::DbId;

use crate::models::question::{CreateQuestion, Question};

/// Column list for `questions` queries.
const COLUMNS: &str = "id, text, weight";

/// Provides data access for catalog questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question and return the stored row.
    ///
    /// Input validation (non-empty text, positive weight) happens in the
    /// handler via `vistoria_core::catalog` before this is called.
    pub async fn create(pool: &SqlitePool, dto: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (text, weight) VALUES ($1, COALESCE($2, 1.0)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(&dto.text)
            .bind(dto.weight)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the full catalog in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions ORDER BY id");
        sqlx::query_as::<_, Question>(&query).fetch_all(pool).await
    }

    /// Delete a question. Returns the number of rows removed (0 = unknown id).
    ///
    /// Callers must first check for referencing answers via
    /// [`crate::repositories::AnswerRepo::count_for_question`]; deletion while
    /// referenced is a conflict, not a cascade.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
