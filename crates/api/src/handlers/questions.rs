//! Handlers for the question catalog.

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::Json;
use vistoria_core::catalog::{self, DEFAULT_WEIGHT};
use vistoria_core::error::CoreError;
use vistoria_core::types::DbId;
use vistoria_db::models::question::CreateQuestion;
use vistoria_db::repositories::{AnswerRepo, QuestionRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /questions
///
/// List the full question catalog in insertion order.
pub async fn list_questions(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<vistoria_db::models::question::Question>>>> {
    let questions = QuestionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: questions }))
}

/// POST /questions
///
/// Create a question from form fields `text` and `weight` (weight defaults
/// to 1.0). Rejects empty text and non-positive weights with 400.
pub async fn create_question(
    State(state): State<AppState>,
    Form(input): Form<CreateQuestion>,
) -> AppResult<(
    StatusCode,
    Json<DataResponse<vistoria_db::models::question::Question>>,
)> {
    catalog::validate_question(&input.text, input.weight.unwrap_or(DEFAULT_WEIGHT))?;

    let question = QuestionRepo::create(&state.pool, &input).await?;

    tracing::info!(question_id = question.id, weight = question.weight, "Question created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// GET /questions/delete/{id}
///
/// Delete a question. Deletion is restricted while any recorded answer
/// references the question, so weights never dangle at scoring time.
pub async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
) -> AppResult<StatusCode> {
    QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }))?;

    let references = AnswerRepo::count_for_question(&state.pool, question_id).await?;
    if references > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Question {question_id} is referenced by {references} recorded answer(s) and cannot be deleted"
        ))));
    }

    QuestionRepo::delete(&state.pool, question_id).await?;

    tracing::info!(question_id, "Question deleted");

    Ok(StatusCode::NO_CONTENT)
}
