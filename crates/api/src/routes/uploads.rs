//! Route definitions for evidence photos.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::evidence;
use crate::state::AppState;

/// Evidence photo routes.
///
/// ```text
/// POST /answers/{id}/photos  -> attach_photos (multipart)
/// GET  /uploads/{filename}   -> serve_photo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/answers/{id}/photos", post(evidence::attach_photos))
        .route("/uploads/{filename}", get(evidence::serve_photo))
}
