//! Route definitions for the question catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::questions;
use crate::state::AppState;

/// Question catalog routes.
///
/// ```text
/// GET  /questions               -> list_questions
/// POST /questions               -> create_question
/// GET  /questions/delete/{id}   -> delete_question
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/questions/delete/{id}", get(questions::delete_question))
}
