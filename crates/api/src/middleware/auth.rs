//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::repositories::SessionRepo;

use crate::auth::token::hash_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from a session bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any dashboard handler:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The session row backing this request.
    pub session_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated(
                "Missing or malformed Authorization header. Expected: Bearer <token>".into(),
            ))
        })?;

        let session = SessionRepo::find_by_token_hash(&state.pool, &hash_session_token(token))
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthenticated(
                    "Invalid or expired session".into(),
                ))
            })?;

        Ok(AuthUser {
            user_id: session.user_id,
            session_id: session.id,
        })
    }
}

/// Extract the bearer token from request headers, if present.
pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}
