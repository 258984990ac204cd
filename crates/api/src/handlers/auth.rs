//! Handlers for the `/auth` resource (login, logout).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use folio_core::error::CoreError;
use folio_db::models::session::CreateSession;
use folio_db::models::user::UserResponse;
use folio_db::repositories::{SessionRepo, UserRepo};

use crate::auth::password::verify_password;
use crate::auth::token::{generate_session_token, hash_session_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::bearer_token;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response. The token is the only copy of the session
/// secret; the server keeps a hash.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: folio_core::types::Timestamp,
    pub user: UserResponse,
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Creates a session and returns
/// its bearer token. Every credential failure -- unknown username or wrong
/// password -- yields the same 401 so the caller learns nothing about
/// which it was.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if input.username.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username is required".into(),
        )));
    }
    if input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Password is required".into(),
        )));
    }

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or(AppError::Core(CoreError::InvalidCredentials))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    let (plaintext, token_hash) = generate_session_token();
    let expires_at = Utc::now() + chrono::Duration::hours(state.config.session_ttl_hours);
    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            token_hash,
            expires_at,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, session_id = session.id, "User logged in");

    Ok(Json(LoginResponse {
        token: plaintext,
        expires_at,
        user: user.into(),
    }))
}

/// POST /api/v1/auth/logout
///
/// Delete the presented session. Unconditional and idempotent: a missing,
/// unknown, or already-deleted token still returns 204.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<StatusCode> {
    if let Some(token) = bearer_token(&headers) {
        let deleted =
            SessionRepo::delete_by_token_hash(&state.pool, &hash_session_token(token)).await?;
        if deleted {
            tracing::info!("Session deleted on logout");
        }
    }
    Ok(StatusCode::NO_CONTENT)
}
