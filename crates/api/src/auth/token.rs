//! Opaque session tokens.
//!
//! The client holds the plaintext token; only its SHA-256 hex digest is
//! stored in the `sessions` table, so a leaked database dump cannot be
//! replayed as a session.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a session token, returning `(plaintext, hash)`.
///
/// The plaintext goes to the client; only the hash is persisted.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a session token.
///
/// Use this to compare an incoming bearer token against the stored hash.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
