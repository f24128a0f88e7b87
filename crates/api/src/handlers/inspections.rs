//! Handlers for the inspection workflow: create, answer form, submit,
//! report, delete.
//!
//! Submission accepts the multipart answer form (fields `question_id_{i}`,
//! `response_{i}`, file fields `photos_{i}`) and records all answers and
//! photo rows in a single transaction -- a partial submission can never be
//! observed. Photo binaries written before a failure are removed again on
//! rollback.

use std::collections::BTreeMap;

use axum::extract::{Form, Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use vistoria_core::error::CoreError;
use vistoria_core::inspection::{self, InspectionStatus};
use vistoria_core::scoring::{self, ResponseValue, ScoredAnswer};
use vistoria_core::types::DbId;
use vistoria_db::models::answer::{AnswerDetail, CreateAnswer};
use vistoria_db::models::inspection::{CreateInspection, Inspection, InspectionSummary};
use vistoria_db::models::photo::CreatePhoto;
use vistoria_db::models::question::Question;
use vistoria_db::repositories::{AnswerRepo, InspectionRepo, PhotoRepo, QuestionRepo};

use crate::error::{AppError, AppResult};
use crate::evidence::PhotoStore;
use crate::response::DataResponse;
use crate::state::AppState;

// ── View types ───────────────────────────────────────────────────────

/// Answer-form view: the inspection plus the full catalog to answer.
#[derive(Debug, Serialize)]
pub struct InspectionFormView {
    pub inspection: Inspection,
    pub questions: Vec<Question>,
}

/// Typed response for the submit endpoint.
#[derive(Debug, Serialize)]
pub struct SubmitResult {
    pub inspection_id: DbId,
    pub answers_recorded: usize,
    pub photos_attached: usize,
}

/// Report view: the inspection, its answers with evidence, and the
/// full-precision compliance score.
#[derive(Debug, Serialize)]
pub struct InspectionReport {
    pub inspection: Inspection,
    pub status: InspectionStatus,
    pub answers: Vec<AnswerDetail>,
    pub compliance_score: f64,
}

// ── List / create ────────────────────────────────────────────────────

/// GET /inspections
///
/// List all inspections, most recent first, with derived status.
pub async fn list_inspections(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<InspectionSummary>>>> {
    let inspections = InspectionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: inspections }))
}

/// GET /inspections/new
///
/// Blank-form scaffold: the catalog questions a new inspection will answer.
pub async fn new_inspection_form(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Question>>>> {
    let questions = QuestionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: questions }))
}

/// POST /inspections/new
///
/// Create an inspection from the form field `title`. The creation
/// timestamp is set server-side and is immutable.
pub async fn create_inspection(
    State(state): State<AppState>,
    Form(input): Form<CreateInspection>,
) -> AppResult<(StatusCode, Json<DataResponse<Inspection>>)> {
    inspection::validate_title(&input.title)?;

    let created = InspectionRepo::create(&state.pool, &input).await?;

    tracing::info!(inspection_id = created.id, "Inspection created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /inspections/{id}
///
/// Answer-form view: the inspection plus all catalog questions.
pub async fn get_inspection(
    State(state): State<AppState>,
    Path(inspection_id): Path<DbId>,
) -> AppResult<Json<DataResponse<InspectionFormView>>> {
    let inspection = find_inspection(&state, inspection_id).await?;
    let questions = QuestionRepo::list(&state.pool).await?;

    Ok(Json(DataResponse {
        data: InspectionFormView {
            inspection,
            questions,
        },
    }))
}

// ── Submit ───────────────────────────────────────────────────────────

/// One indexed group of submission fields, as received.
#[derive(Debug, Default)]
struct SubmitEntry {
    question_id: Option<DbId>,
    response: Option<String>,
    photos: Vec<(String, Vec<u8>)>,
}

/// A submission entry after validation.
struct ValidatedEntry {
    question_id: DbId,
    response: ResponseValue,
    photos: Vec<(String, Vec<u8>)>,
}

/// POST /inspections/{id}/submit
///
/// Record the answer form. For every index `i` where both `question_id_{i}`
/// and `response_{i}` are present, validates the response value and the
/// question reference, records the answer, and attaches each uploaded
/// `photos_{i}` file. The whole submission is one transaction.
pub async fn submit_inspection(
    State(state): State<AppState>,
    Path(inspection_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<SubmitResult>>)> {
    let inspection = find_inspection(&state, inspection_id).await?;

    let entries = collect_submit_fields(multipart).await?;
    let validated = validate_entries(&state, entries).await?;

    // All answer and photo rows commit together; photo binaries written
    // before a failure are removed again after rollback.
    let mut tx = state.pool.begin().await?;
    let mut written: Vec<String> = Vec::new();
    let mut answers_recorded = 0usize;
    let mut photos_attached = 0usize;
    let mut failure: Option<AppError> = None;

    'record: for entry in &validated {
        let answer = match AnswerRepo::create_tx(
            &mut *tx,
            &CreateAnswer {
                inspection_id: inspection.id,
                question_id: entry.question_id,
                response: entry.response.as_str().to_string(),
            },
        )
        .await
        {
            Ok(answer) => answer,
            Err(err) => {
                failure = Some(err.into());
                break 'record;
            }
        };
        answers_recorded += 1;

        for (original, bytes) in &entry.photos {
            let stored = PhotoStore::stored_name(answer.id, original);
            if let Err(err) = PhotoRepo::create_tx(
                &mut *tx,
                &CreatePhoto {
                    answer_id: answer.id,
                    filename: stored.clone(),
                    original_filename: original.clone(),
                },
            )
            .await
            {
                failure = Some(err.into());
                break 'record;
            }
            // Tracked before the write: a failed write can still leave a
            // partial file, and `remove` tolerates names never written.
            written.push(stored.clone());
            if let Err(err) = state.photos.save(&stored, bytes).await {
                failure = Some(err.into());
                break 'record;
            }
            photos_attached += 1;
        }
    }

    if let Some(err) = failure {
        drop(tx);
        remove_files(&state, &written).await;
        return Err(err);
    }

    if let Err(err) = tx.commit().await {
        remove_files(&state, &written).await;
        return Err(err.into());
    }

    tracing::info!(
        inspection_id = inspection.id,
        answers_recorded,
        photos_attached,
        "Inspection submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmitResult {
                inspection_id: inspection.id,
                answers_recorded,
                photos_attached,
            },
        }),
    ))
}

// ── Report ───────────────────────────────────────────────────────────

/// GET /inspections/{id}/report
///
/// Read-only derived view: answers with evidence and the compliance score.
pub async fn show_report(
    State(state): State<AppState>,
    Path(inspection_id): Path<DbId>,
) -> AppResult<Json<DataResponse<InspectionReport>>> {
    let inspection = find_inspection(&state, inspection_id).await?;

    let mut answers = AnswerRepo::list_details(&state.pool, inspection_id).await?;
    for answer in &mut answers {
        answer.photos = PhotoRepo::list_for_answer(&state.pool, answer.id).await?;
    }

    let rows = AnswerRepo::scored_rows(&state.pool, inspection_id).await?;
    let scored: Vec<ScoredAnswer> = rows
        .iter()
        .map(|row| {
            // Stored responses are validated on the way in; anything else
            // here is corrupt data, not user error.
            let response = ResponseValue::parse(&row.response).map_err(|_| {
                AppError::InternalError(format!(
                    "Corrupt response value '{}' stored for inspection {inspection_id}",
                    row.response
                ))
            })?;
            Ok(ScoredAnswer {
                response,
                weight: row.weight,
            })
        })
        .collect::<Result<_, AppError>>()?;

    let compliance_score = scoring::compliance_score(&scored);
    let status = InspectionStatus::from_answer_count(answers.len() as i64);

    Ok(Json(DataResponse {
        data: InspectionReport {
            inspection,
            status,
            answers,
            compliance_score,
        },
    }))
}

// ── Delete ───────────────────────────────────────────────────────────

/// DELETE /inspections/{id}
///
/// Cascade-delete the inspection, its answers, their photo rows, and the
/// photo binaries.
pub async fn delete_inspection(
    State(state): State<AppState>,
    Path(inspection_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let filenames = InspectionRepo::delete(&state.pool, inspection_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inspection",
            id: inspection_id,
        }))?;

    remove_files(&state, &filenames).await;

    tracing::info!(
        inspection_id,
        photos_removed = filenames.len(),
        "Inspection deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

// ── Private helpers ──────────────────────────────────────────────────

async fn find_inspection(state: &AppState, id: DbId) -> AppResult<Inspection> {
    InspectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inspection",
            id,
        }))
}

/// Group the multipart fields by their numeric suffix.
///
/// Unknown field names are ignored; empty file inputs (no filename, no
/// bytes) are skipped, matching ordinary browser form behaviour.
async fn collect_submit_fields(
    mut multipart: Multipart,
) -> Result<BTreeMap<u32, SubmitEntry>, AppError> {
    let mut entries: BTreeMap<u32, SubmitEntry> = BTreeMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(raw_index) = name.strip_prefix("question_id_") {
            let index = parse_index(raw_index)?;
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            let question_id = text.trim().parse::<DbId>().map_err(|_| {
                AppError::Core(CoreError::Validation(format!(
                    "Invalid question id '{text}'"
                )))
            })?;
            entries.entry(index).or_default().question_id = Some(question_id);
        } else if let Some(raw_index) = name.strip_prefix("response_") {
            let index = parse_index(raw_index)?;
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            entries.entry(index).or_default().response = Some(text);
        } else if let Some(raw_index) = name.strip_prefix("photos_") {
            let index = parse_index(raw_index)?;
            let original = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            if original.is_empty() && bytes.is_empty() {
                continue;
            }
            entries
                .entry(index)
                .or_default()
                .photos
                .push((original, bytes.to_vec()));
        }
    }

    Ok(entries)
}

fn parse_index(raw: &str) -> Result<u32, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Malformed submission field index '{raw}'")))
}

/// Validate every complete entry before anything is written: the response
/// must be in the closed set and the question must exist. Entries missing
/// either field are skipped, matching browser form submission of
/// unanswered questions.
async fn validate_entries(
    state: &AppState,
    entries: BTreeMap<u32, SubmitEntry>,
) -> Result<Vec<ValidatedEntry>, AppError> {
    let mut validated = Vec::new();

    for (_, entry) in entries {
        let (Some(question_id), Some(raw_response)) = (entry.question_id, entry.response) else {
            continue;
        };

        let response = ResponseValue::parse(&raw_response)?;

        QuestionRepo::find_by_id(&state.pool, question_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Question",
                id: question_id,
            }))?;

        validated.push(ValidatedEntry {
            question_id,
            response,
            photos: entry.photos,
        });
    }

    Ok(validated)
}

async fn remove_files(state: &AppState, names: &[String]) {
    for name in names {
        state.photos.remove(name).await;
    }
}
