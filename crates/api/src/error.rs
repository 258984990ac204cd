use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use folio_core::error::CoreError;
use folio_media::MediaError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`MediaError`] for asset
/// backend failures, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `folio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A media backend error from `folio_media`.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::DuplicateOrder { .. } => {
                    (StatusCode::CONFLICT, "DUPLICATE_ORDER", core.to_string())
                }
                CoreError::DuplicateUsername { .. } => (
                    StatusCode::CONFLICT,
                    "DUPLICATE_USERNAME",
                    core.to_string(),
                ),
                // One status and one message for every credential failure
                // so callers cannot distinguish the root cause.
                CoreError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    core.to_string(),
                ),
                CoreError::Unauthenticated(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Media backend errors ---
            AppError::Media(media) => match media {
                MediaError::Store(msg) => {
                    tracing::error!(error = %msg, "Asset store failure");
                    (
                        StatusCode::BAD_GATEWAY,
                        "ASSET_STORE_FAILURE",
                        "Failed to store uploaded asset".to_string(),
                    )
                }
                MediaError::BadReference(reference) => (
                    StatusCode::BAD_REQUEST,
                    "BAD_REQUEST",
                    format!("Malformed asset reference: {reference}"),
                ),
                // Release failures are logged at call sites and never
                // propagate; reaching here means a call site misused them.
                MediaError::Release { .. } => {
                    tracing::error!(error = %media, "Asset release error escaped its call site");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on known constraints map to the matching domain
///   conflict; the application pre-checks should catch these first, so
///   hitting the index means two writers raced.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                match constraint {
                    "uq_projects_display_order" => {
                        return (
                            StatusCode::CONFLICT,
                            "DUPLICATE_ORDER",
                            "Display order is already used by another project".to_string(),
                        );
                    }
                    "uq_users_username" => {
                        return (
                            StatusCode::CONFLICT,
                            "DUPLICATE_USERNAME",
                            "Username is already taken".to_string(),
                        );
                    }
                    other if other.starts_with("uq_") => {
                        return (
                            StatusCode::CONFLICT,
                            "CONFLICT",
                            format!("Duplicate value violates unique constraint: {other}"),
                        );
                    }
                    _ => {}
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
