//! Media asset manager: stores and releases project-owned binary assets
//! behind an opaque reference, with a pluggable backend (local disk or S3)
//! chosen by configuration.
//!
//! References round-trip: every backend can derive the deletion key from a
//! reference it previously returned. Releasing a reference twice is
//! harmless, and release failures are expected to be logged by the caller
//! rather than propagated -- the database row is the source of truth, and
//! an orphaned blob is recoverable by the sweep while a blocked CRUD
//! operation is not.

mod local;
mod s3;

pub use local::LocalStore;
pub use s3::S3Store;

use async_trait::async_trait;

use folio_core::media::AssetKind;

/// Failures from the media backend.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Upload failed. Fatal for the owning operation: the DB write must
    /// not proceed, or a row would reference a non-existent asset.
    #[error("Failed to store asset: {0}")]
    Store(String),

    /// Deletion failed. Never fatal for the owning operation.
    #[error("Failed to release asset '{reference}': {message}")]
    Release { reference: String, message: String },

    /// The reference was not produced by this backend.
    #[error("Malformed asset reference: {0}")]
    BadReference(String),
}

/// Where media lives. Object-safe so the API can hold `Arc<dyn MediaStore>`
/// and swap backends by configuration.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store a binary payload, returning an opaque reference unique to this
    /// upload. An existing unrelated asset is never overwritten.
    async fn store(
        &self,
        payload: Vec<u8>,
        kind: AssetKind,
        original_filename: &str,
    ) -> Result<String, MediaError>;

    /// Best-effort deletion of the asset behind `reference`. Releasing an
    /// already-released reference succeeds.
    async fn release(&self, reference: &str) -> Result<(), MediaError>;

    /// Every reference currently held by the backend. Input to the orphan
    /// sweep.
    async fn list(&self) -> Result<Vec<String>, MediaError>;
}

/// Release an asset, logging instead of propagating on failure.
///
/// This is the only way call sites should release assets whose owning row
/// mutation has to proceed regardless.
pub async fn release_or_log(store: &dyn MediaStore, reference: &str) {
    if let Err(err) = store.release(reference).await {
        tracing::warn!(%reference, error = %err, "Asset release failed, leaving orphan for sweep");
    }
}

/// Reduce an uploaded filename to a safe reference component.
///
/// Keeps ASCII alphanumerics, `.`, `-`, and `_`; everything else becomes
/// `_`. Empty input falls back to `upload.bin`.
pub(crate) fn sanitize_filename(original: &str) -> String {
    let safe: String = original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.trim_matches(|c| c == '.' || c == '_').is_empty() {
        "upload.bin".to_string()
    } else {
        safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("logo-v2.png"), "logo-v2.png");
    }

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize_filename("my photo (1).png"), "my_photo__1_.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
    }

    #[test]
    fn sanitize_falls_back_on_empty() {
        assert_eq!(sanitize_filename(""), "upload.bin");
        assert_eq!(sanitize_filename("..."), "upload.bin");
    }
}
