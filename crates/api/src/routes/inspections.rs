//! Route definitions for the inspection workflow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::inspections;
use crate::state::AppState;

/// Inspection workflow routes.
///
/// ```text
/// GET    /inspections              -> list_inspections
/// GET    /inspections/new          -> new_inspection_form
/// POST   /inspections/new          -> create_inspection
/// GET    /inspections/{id}         -> get_inspection (answer form view)
/// DELETE /inspections/{id}         -> delete_inspection (cascade)
/// POST   /inspections/{id}/submit  -> submit_inspection (multipart)
/// GET    /inspections/{id}/report  -> show_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/inspections", get(inspections::list_inspections))
        .route(
            "/inspections/new",
            get(inspections::new_inspection_form).post(inspections::create_inspection),
        )
        .route(
            "/inspections/{id}",
            get(inspections::get_inspection).delete(inspections::delete_inspection),
        )
        .route(
            "/inspections/{id}/submit",
            post(inspections::submit_inspection),
        )
        .route("/inspections/{id}/report", get(inspections::show_report))
}
