//! Session model and DTO.

use sqlx::FromRow;

use folio_core::types::{DbId, Timestamp};

/// A session row from the `sessions` table.
///
/// `token_hash` is the SHA-256 hex digest of the opaque bearer token; the
/// plaintext token is only ever held by the client.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
