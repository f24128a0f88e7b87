//! Repository for the `answers` table.

use sqlx::{SqliteConnection, SqlitePool};
use vistoria_core::types::DbId;

use crate::models::answer::{Answer, AnswerDetail, CreateAnswer, ScoredAnswerRow};

/// Column list for `answers` queries.
const COLUMNS: &str = "id, inspection_id, question_id, response";

/// Provides data access for inspection answers.
pub struct AnswerRepo;

impl AnswerRepo {
    /// Insert an answer inside an open transaction.
    ///
    /// The `uq_answers_inspection_question` constraint enforces at most one
    /// answer per question per inspection; a duplicate surfaces as a sqlx
    /// unique violation.
    pub async fn create_tx(
        conn: &mut SqliteConnection,
        dto: &CreateAnswer,
    ) -> Result<Answer, sqlx::Error> {
        let query = format!(
            "INSERT INTO answers (inspection_id, question_id, response) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(dto.inspection_id)
            .bind(dto.question_id)
            .bind(&dto.response)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM answers WHERE id = $1");
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an inspection's answers joined with question text and weight,
    /// in submission order. Photos are not populated here; the caller
    /// attaches them per answer.
    pub async fn list_details(
        pool: &SqlitePool,
        inspection_id: DbId,
    ) -> Result<Vec<AnswerDetail>, sqlx::Error> {
        sqlx::query_as::<_, AnswerDetail>(
            "SELECT a.id, a.question_id, q.text AS question_text, q.weight, a.response \
             FROM answers a \
             JOIN questions q ON q.id = a.question_id \
             WHERE a.inspection_id = $1 \
             ORDER BY a.id",
        )
        .bind(inspection_id)
        .fetch_all(pool)
        .await
    }

    /// Fetch the scoring input for an inspection: each answer's response
    /// paired with its question's weight.
    pub async fn scored_rows(
        pool: &SqlitePool,
        inspection_id: DbId,
    ) -> Result<Vec<ScoredAnswerRow>, sqlx::Error> {
        sqlx::query_as::<_, ScoredAnswerRow>(
            "SELECT a.response, q.weight \
             FROM answers a \
             JOIN questions q ON q.id = a.question_id \
             WHERE a.inspection_id = $1",
        )
        .bind(inspection_id)
        .fetch_all(pool)
        .await
    }

    /// Count the answers referencing a question, across all inspections.
    /// Used to enforce the restrict-on-delete policy for questions.
    pub async fn count_for_question(
        pool: &SqlitePool,
        question_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM answers WHERE question_id = $1")
            .bind(question_id)
            .fetch_one(pool)
            .await
    }
}
