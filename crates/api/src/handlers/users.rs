//! Handlers for the `/users` resource (dashboard user management).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use folio_core::error::CoreError;
use folio_db::models::user::{CreateUser, UserResponse};
use folio_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /users`. The plaintext password is hashed
/// before anything is written.
#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/users
///
/// Add a dashboard user. Duplicate usernames are rejected by a pre-check
/// (friendly error) with the unique index as the concurrent-writer
/// backstop.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<AddUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
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

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::DuplicateUsername {
            username: input.username,
        }));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            password_hash,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        created_by = auth_user.user_id,
        "User added"
    );

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
