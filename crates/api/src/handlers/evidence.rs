//! Handlers for evidence photos: standalone attachment and retrieval.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use vistoria_core::error::CoreError;
use vistoria_core::types::DbId;
use vistoria_db::models::photo::{CreatePhoto, Photo};
use vistoria_db::repositories::{AnswerRepo, PhotoRepo};

use crate::error::{AppError, AppResult};
use crate::evidence::PhotoStore;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /answers/{id}/photos
///
/// Attach one or more photos to an existing answer. Each file is handled
/// independently: a failure partway leaves earlier attachments intact and
/// never corrupts them.
pub async fn attach_photos(
    State(state): State<AppState>,
    Path(answer_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Photo>>>)> {
    AnswerRepo::find_by_id(&state.pool, answer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id: answer_id,
        }))?;

    let mut attached = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        // Only file fields carry a filename; stray text fields are ignored.
        let Some(original) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if original.is_empty() && bytes.is_empty() {
            continue;
        }

        // File first, row second: a failed row insert removes the file
        // again, so the store never holds unreferenced photos.
        let stored = PhotoStore::stored_name(answer_id, &original);
        state.photos.save(&stored, &bytes).await?;

        let photo = match PhotoRepo::create(
            &state.pool,
            &CreatePhoto {
                answer_id,
                filename: stored.clone(),
                original_filename: original,
            },
        )
        .await
        {
            Ok(photo) => photo,
            Err(err) => {
                state.photos.remove(&stored).await;
                return Err(err.into());
            }
        };

        attached.push(photo);
    }

    if attached.is_empty() {
        return Err(AppError::BadRequest(
            "No files received in multipart upload".to_string(),
        ));
    }

    tracing::info!(answer_id, photos = attached.len(), "Photos attached");

    Ok((StatusCode::CREATED, Json(DataResponse { data: attached })))
}

/// GET /uploads/{filename}
///
/// Serve a stored photo. 404 for unknown names, names that fail the
/// safe-filename guard, and missing files.
pub async fn serve_photo(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    let photo = PhotoRepo::find_by_filename(&state.pool, &filename)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No photo stored as '{filename}'")))?;

    let bytes = state
        .photos
        .load(&photo.filename)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No photo stored as '{filename}'")))?;

    Ok((
        [(header::CONTENT_TYPE, content_type_for(&photo.filename))],
        bytes,
    ))
}

/// Best-effort content type from the file extension.
fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or_default();
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type_for("1-ab-scan.jpg"), "image/jpeg");
        assert_eq!(content_type_for("1-ab-scan.png"), "image/png");
        assert_eq!(content_type_for("1-ab-scan.webp"), "image/webp");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
