//! HTTP-level integration tests for media upload and the orphan sweep.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_auth, post_json_auth, post_upload, seed_and_login};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_stores_file_and_returns_reference(pool: PgPool) {
    let (app, media) = common::build_test_app(pool.clone()).await;
    let token = seed_and_login(&pool, app.clone(), "admin").await;

    let response = post_upload(app.clone(), &token, "image", "logo.png", b"png bytes").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let reference = body_json(response).await["reference"]
        .as_str()
        .unwrap()
        .to_string();

    assert!(reference.starts_with("images/"));
    assert_eq!(
        std::fs::read(media.path().join(&reference)).unwrap(),
        b"png bytes"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_requires_session_and_kind(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool.clone()).await;

    let response = post_upload(app.clone(), "bogus-token", "image", "x.png", b"data").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = seed_and_login(&pool, app.clone(), "admin").await;
    let response = post_upload(app.clone(), &token, "audio", "x.ogg", b"data").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The sweep releases assets no project references and keeps the rest.
#[sqlx::test(migrations = "../db/migrations")]
async fn sweep_releases_only_orphans(pool: PgPool) {
    let (app, media) = common::build_test_app(pool.clone()).await;
    let token = seed_and_login(&pool, app.clone(), "admin").await;

    // One referenced asset...
    let response = post_upload(app.clone(), &token, "image", "kept.png", b"kept").await;
    let kept = body_json(response).await["reference"]
        .as_str()
        .unwrap()
        .to_string();
    let body = json!({
        "name": "Keeper",
        "description": "d",
        "languages": "Rust",
        "image_ref": kept,
    });
    let response = post_json_auth(app.clone(), "/api/v1/projects", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // ...and one orphan, as if a crash had lost the row.
    let response = post_upload(app.clone(), &token, "video", "orphan.mp4", b"orphan").await;
    let orphan = body_json(response).await["reference"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_auth(app.clone(), "/api/v1/media/sweep", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["released"], 1);

    assert!(media.path().join(&kept).is_file(), "referenced asset kept");
    assert!(!media.path().join(&orphan).exists(), "orphan released");
}

/// Running the sweep twice releases nothing new.
#[sqlx::test(migrations = "../db/migrations")]
async fn sweep_is_idempotent(pool: PgPool) {
    let (app, _media) = common::build_test_app(pool.clone()).await;
    let token = seed_and_login(&pool, app.clone(), "admin").await;

    post_upload(app.clone(), &token, "image", "stray.png", b"stray").await;

    let response = post_auth(app.clone(), "/api/v1/media/sweep", &token).await;
    assert_eq!(body_json(response).await["released"], 1);

    let response = post_auth(app.clone(), "/api/v1/media/sweep", &token).await;
    assert_eq!(body_json(response).await["released"], 0);
}
