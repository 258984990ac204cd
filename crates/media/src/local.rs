//! Local-filesystem media backend.
//!
//! References are relative paths under the media root, e.g.
//! `images/3f2a…-logo.png`, and are served read-only by the API under
//! `/media`. Release resolves a reference back to a path inside the root
//! and refuses anything that would escape it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use folio_core::media::AssetKind;

use crate::{sanitize_filename, MediaError, MediaStore};

/// Media backend writing files beneath a configured root directory.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open (and create if needed) the media root and its `images/` and
    /// `videos/` subdirectories.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, MediaError> {
        let root = root.into();
        for prefix in [AssetKind::Image.prefix(), AssetKind::Video.prefix()] {
            tokio::fs::create_dir_all(root.join(prefix))
                .await
                .map_err(|e| MediaError::Store(format!("Cannot create media root: {e}")))?;
        }
        Ok(LocalStore { root })
    }

    /// The directory this store writes under. The API serves it at `/media`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a reference to a path inside the root.
    ///
    /// Only `images/<name>` and `videos/<name>` shapes are accepted; path
    /// separators or `..` inside the name are rejected, so a reference can
    /// never address a file outside the media root.
    fn resolve(&self, reference: &str) -> Result<PathBuf, MediaError> {
        let (prefix, name) = reference
            .split_once('/')
            .ok_or_else(|| MediaError::BadReference(reference.to_string()))?;
        if prefix != AssetKind::Image.prefix() && prefix != AssetKind::Video.prefix() {
            return Err(MediaError::BadReference(reference.to_string()));
        }
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(MediaError::BadReference(reference.to_string()));
        }
        Ok(self.root.join(prefix).join(name))
    }
}

#[async_trait]
impl MediaStore for LocalStore {
    async fn store(
        &self,
        payload: Vec<u8>,
        kind: AssetKind,
        original_filename: &str,
    ) -> Result<String, MediaError> {
        let reference = format!(
            "{}/{}-{}",
            kind.prefix(),
            Uuid::new_v4(),
            sanitize_filename(original_filename)
        );
        let path = self.root.join(&reference);
        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| MediaError::Store(format!("Cannot write {}: {e}", path.display())))?;
        Ok(reference)
    }

    async fn release(&self, reference: &str) -> Result<(), MediaError> {
        let path = self.resolve(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Already gone: release stays idempotent.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaError::Release {
                reference: reference.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn list(&self) -> Result<Vec<String>, MediaError> {
        let mut refs = Vec::new();
        for prefix in [AssetKind::Image.prefix(), AssetKind::Video.prefix()] {
            let dir = self.root.join(prefix);
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(MediaError::Store(format!(
                        "Cannot read {}: {e}",
                        dir.display()
                    )))
                }
            };
            while let Some(entry) = entries.next_entry().await.map_err(|e| {
                MediaError::Store(format!("Cannot read {}: {e}", dir.display()))
            })? {
                if let Some(name) = entry.file_name().to_str() {
                    refs.push(format!("{prefix}/{name}"));
                }
            }
        }
        Ok(refs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store_in(dir: &TempDir) -> LocalStore {
        LocalStore::new(dir.path()).await.expect("store should open")
    }

    #[tokio::test]
    async fn store_then_release_leaves_nothing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;

        let reference = store
            .store(b"png bytes".to_vec(), AssetKind::Image, "logo.png")
            .await
            .unwrap();
        assert!(dir.path().join(&reference).is_file());

        store.release(&reference).await.unwrap();
        assert!(!dir.path().join(&reference).exists());
    }

    #[tokio::test]
    async fn double_release_is_harmless() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;

        let reference = store
            .store(b"data".to_vec(), AssetKind::Video, "demo.mp4")
            .await
            .unwrap();
        store.release(&reference).await.unwrap();
        store
            .release(&reference)
            .await
            .expect("second release of the same reference must not fail");
    }

    #[tokio::test]
    async fn same_filename_yields_distinct_references() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;

        let first = store
            .store(b"one".to_vec(), AssetKind::Image, "logo.png")
            .await
            .unwrap();
        let second = store
            .store(b"two".to_vec(), AssetKind::Image, "logo.png")
            .await
            .unwrap();

        assert_ne!(first, second, "a second upload must never overwrite the first");
        assert_eq!(tokio::fs::read(dir.path().join(&first)).await.unwrap(), b"one");
        assert_eq!(tokio::fs::read(dir.path().join(&second)).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn release_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;

        for reference in [
            "images/../outside.txt",
            "../images/x.png",
            "secrets/x.png",
            "images/",
        ] {
            assert!(
                matches!(
                    store.release(reference).await,
                    Err(MediaError::BadReference(_))
                ),
                "reference {reference:?} must be rejected"
            );
        }
    }

    #[tokio::test]
    async fn list_reports_stored_references() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;

        let image = store
            .store(b"i".to_vec(), AssetKind::Image, "a.png")
            .await
            .unwrap();
        let video = store
            .store(b"v".to_vec(), AssetKind::Video, "b.mp4")
            .await
            .unwrap();

        let mut listed = store.list().await.unwrap();
        listed.sort();
        let mut expected = vec![image, video];
        expected.sort();
        assert_eq!(listed, expected);
    }
}
