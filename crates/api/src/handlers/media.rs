//! Handlers for the `/media` resource: multipart upload and the orphan
//! sweep.

use std::collections::HashSet;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use folio_core::media::AssetKind;
use folio_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response for `POST /media`: the opaque reference to attach to a
/// project row.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub reference: String,
}

/// Response for `POST /media/sweep`.
#[derive(Debug, Serialize)]
pub struct SweepResponse {
    /// Orphaned assets released by this sweep.
    pub released: u64,
}

/// POST /api/v1/media
///
/// Multipart form with a `kind` field (`image` or `video`) and a `file`
/// field. A store failure aborts with 502 before any row could reference
/// the asset.
pub async fn upload(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let mut kind: Option<AssetKind> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "kind" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable kind field: {e}")))?;
                kind = Some(text.parse()?);
            }
            "file" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable file field: {e}")))?;
                file = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| AppError::BadRequest("Missing 'kind' field".into()))?;
    let (filename, payload) =
        file.ok_or_else(|| AppError::BadRequest("Missing 'file' field".into()))?;
    if payload.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let reference = state.media.store(payload, kind, &filename).await?;

    tracing::info!(%reference, user_id = auth_user.user_id, "Asset stored");
    Ok((StatusCode::CREATED, Json(UploadResponse { reference })))
}

/// POST /api/v1/media/sweep
///
/// Reconciliation pass: release every asset the backend holds that no
/// project row references. Covers assets orphaned by a crash between
/// asset I/O and the database commit, and releases that failed and were
/// only logged.
pub async fn sweep(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<SweepResponse>> {
    let referenced: HashSet<String> = ProjectRepo::all_asset_refs(&state.pool)
        .await?
        .into_iter()
        .collect();

    let mut released = 0u64;
    for reference in state.media.list().await? {
        if referenced.contains(&reference) {
            continue;
        }
        match state.media.release(&reference).await {
            Ok(()) => released += 1,
            Err(err) => {
                tracing::warn!(%reference, error = %err, "Sweep could not release orphan")
            }
        }
    }

    tracing::info!(released, user_id = auth_user.user_id, "Media sweep finished");
    Ok(Json(SweepResponse { released }))
}
