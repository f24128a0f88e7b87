//! HTTP-level tests for evidence photos: upload, sanitized storage names,
//! retrieval, and traversal resistance.

mod common;

use axum::http::{header, StatusCode};
use axum::Router;
use sqlx::SqlitePool;

use common::{
    body_bytes, body_json, get, post_multipart, seed_inspection, seed_question, test_app,
    MultipartBuilder,
};

const JPEG_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0fake-jpeg-payload";

/// Submit one answered question with one photo; return the stored filename.
async fn submit_with_photo(app: &Router, original_filename: &str) -> String {
    let question_id = seed_question(app, "Evidencia fotografica?", 1.0).await;
    let inspection_id = seed_inspection(app, "Vistoria com fotos").await;

    let (content_type, body) = MultipartBuilder::new()
        .text("question_id_0", &question_id.to_string())
        .text("response_0", "Não Conforme")
        .file("photos_0", original_filename, "image/jpeg", JPEG_BYTES)
        .build();
    let submit = post_multipart(
        app,
        &format!("/inspections/{inspection_id}/submit"),
        &content_type,
        body,
    )
    .await;
    assert_eq!(submit.status(), StatusCode::CREATED);
    assert_eq!(body_json(submit).await["data"]["photos_attached"], 1);

    let report = body_json(get(app, &format!("/inspections/{inspection_id}/report")).await).await;
    report["data"]["answers"][0]["photos"][0]["filename"]
        .as_str()
        .unwrap()
        .to_string()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn uploaded_photo_is_served_back(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let stored = submit_with_photo(&app, "evidencia.jpg").await;
    assert!(stored.ends_with("evidencia.jpg"));

    let response = get(&app, &format!("/uploads/{stored}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/jpeg"
    );
    assert_eq!(body_bytes(response).await, JPEG_BYTES);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn traversal_filename_is_sanitized(pool: SqlitePool) {
    let (app, dir) = test_app(pool);

    let stored = submit_with_photo(&app, "../../etc/passwd").await;
    assert!(!stored.contains('/'));
    assert!(!stored.contains('\\'));
    assert!(!stored.contains(".."));
    assert!(stored.ends_with("etc_passwd"));

    // The file landed inside the upload root, nowhere else.
    let in_root: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(in_root, vec![stored.clone()]);

    let response = get(&app, &format!("/uploads/{stored}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn colliding_original_names_get_distinct_stored_names(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let q1 = seed_question(&app, "Primeira evidencia", 1.0).await;
    let q2 = seed_question(&app, "Segunda evidencia", 1.0).await;
    let inspection_id = seed_inspection(&app, "Nomes repetidos").await;

    let (content_type, body) = MultipartBuilder::new()
        .text("question_id_0", &q1.to_string())
        .text("response_0", "Conforme")
        .file("photos_0", "foto.jpg", "image/jpeg", JPEG_BYTES)
        .text("question_id_1", &q2.to_string())
        .text("response_1", "Conforme")
        .file("photos_1", "foto.jpg", "image/jpeg", JPEG_BYTES)
        .build();
    let submit = post_multipart(
        &app,
        &format!("/inspections/{inspection_id}/submit"),
        &content_type,
        body,
    )
    .await;
    assert_eq!(submit.status(), StatusCode::CREATED);

    let report = body_json(get(&app, &format!("/inspections/{inspection_id}/report")).await).await;
    let answers = report["data"]["answers"].as_array().unwrap();
    let first = answers[0]["photos"][0]["filename"].as_str().unwrap();
    let second = answers[1]["photos"][0]["filename"].as_str().unwrap();
    assert_ne!(first, second);
    assert!(first.ends_with("foto.jpg"));
    assert!(second.ends_with("foto.jpg"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_photo_returns_not_found(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let response = get(&app, "/uploads/1-deadbeef-nada.jpg").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn traversal_request_path_returns_not_found(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    // Encoded traversal decodes to "../../etc/passwd"; no photo row matches
    // and the safe-filename guard refuses it regardless.
    let response = get(&app, "/uploads/..%2F..%2Fetc%2Fpasswd").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attach_photos_to_existing_answer(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let question_id = seed_question(&app, "Evidencia posterior", 1.0).await;
    let inspection_id = seed_inspection(&app, "Anexo tardio").await;

    let (content_type, body) = MultipartBuilder::new()
        .text("question_id_0", &question_id.to_string())
        .text("response_0", "Não Conforme")
        .build();
    let submit = post_multipart(
        &app,
        &format!("/inspections/{inspection_id}/submit"),
        &content_type,
        body,
    )
    .await;
    assert_eq!(submit.status(), StatusCode::CREATED);

    let report = body_json(get(&app, &format!("/inspections/{inspection_id}/report")).await).await;
    let answer_id = report["data"]["answers"][0]["id"].as_i64().unwrap();

    let (content_type, body) = MultipartBuilder::new()
        .file("photos", "anexo.png", "image/png", b"fake-png")
        .build();
    let attach = post_multipart(
        &app,
        &format!("/answers/{answer_id}/photos"),
        &content_type,
        body,
    )
    .await;
    assert_eq!(attach.status(), StatusCode::CREATED);

    let attached = body_json(attach).await;
    let stored = attached["data"][0]["filename"].as_str().unwrap().to_string();
    assert_eq!(attached["data"][0]["original_filename"], "anexo.png");

    let served = get(&app, &format!("/uploads/{stored}")).await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.headers()[header::CONTENT_TYPE], "image/png");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attach_to_unknown_answer_returns_not_found(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let (content_type, body) = MultipartBuilder::new()
        .file("photos", "orfao.jpg", "image/jpeg", JPEG_BYTES)
        .build();
    let response = post_multipart(&app, "/answers/404/photos", &content_type, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attach_without_files_is_rejected(pool: SqlitePool) {
    let (app, _dir) = test_app(pool);

    let question_id = seed_question(&app, "Sem anexo", 1.0).await;
    let inspection_id = seed_inspection(&app, "Upload vazio").await;

    let (content_type, body) = MultipartBuilder::new()
        .text("question_id_0", &question_id.to_string())
        .text("response_0", "Conforme")
        .build();
    post_multipart(
        &app,
        &format!("/inspections/{inspection_id}/submit"),
        &content_type,
        body,
    )
    .await;

    let report = body_json(get(&app, &format!("/inspections/{inspection_id}/report")).await).await;
    let answer_id = report["data"]["answers"][0]["id"].as_i64().unwrap();

    let (content_type, body) = MultipartBuilder::new().text("note", "nada").build();
    let response = post_multipart(
        &app,
        &format!("/answers/{answer_id}/photos"),
        &content_type,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
