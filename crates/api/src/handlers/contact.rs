//! Handlers for the `/contact` resource. Submissions are append-only.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use folio_core::contact::validate_submission;
use folio_db::models::contact::{ContactMessage, CreateContactMessage};
use folio_db::repositories::ContactRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/contact (public)
///
/// Validation precedes the insert, so a rejected submission leaves no row.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<CreateContactMessage>,
) -> AppResult<(StatusCode, Json<ContactMessage>)> {
    validate_submission(&input.fname, &input.lname, &input.email, &input.message)?;
    let message = ContactRepo::create(&state.pool, &input).await?;
    tracing::info!(contact_id = message.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/v1/contact (dashboard)
pub async fn list(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<Vec<ContactMessage>>> {
    let messages = ContactRepo::list(&state.pool).await?;
    Ok(Json(messages))
}
