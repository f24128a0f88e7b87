pub mod health;
pub mod inspections;
pub mod questions;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /questions                      list, create (form: text, weight)
/// /questions/delete/{id}          delete (restricted while referenced)
///
/// /inspections                    list, newest first
/// /inspections/new                blank-form scaffold (GET), create (POST, form: title)
/// /inspections/{id}               answer-form view (GET), cascade delete (DELETE)
/// /inspections/{id}/submit        record answer form (POST, multipart)
/// /inspections/{id}/report        compliance report (GET)
///
/// /answers/{id}/photos            attach evidence photos (POST, multipart)
/// /uploads/{filename}             serve a stored photo (GET)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(questions::router())
        .merge(inspections::router())
        .merge(uploads::router())
}
