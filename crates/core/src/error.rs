use crate::types::DbId;

/// Domain error taxonomy shared by every layer above `folio-core`.
///
/// Each variant is recoverable from the caller's point of view except
/// `Internal`, which carries a message that must never reach clients
/// unsanitized.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Order {order} is already used by another project")]
    DuplicateOrder { order: i32 },

    #[error("Username '{username}' is already taken")]
    DuplicateUsername { username: String },

    /// Deliberately carries no detail: wrong password, unknown username,
    /// and an ambiguous username row count all surface identically.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
