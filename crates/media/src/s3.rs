//! S3 media backend.
//!
//! References are public object URLs
//! (`https://{bucket}.s3.{region}.amazonaws.com/{key}`); release recovers
//! the object key from the URL, so a reference stored years ago still
//! deletes the same object.

use async_trait::async_trait;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use uuid::Uuid;

use folio_core::media::AssetKind;

use crate::{sanitize_filename, MediaError, MediaStore};

/// Media backend holding objects in an S3 bucket.
pub struct S3Store {
    client: Client,
    bucket: String,
    region: String,
}

impl S3Store {
    /// Build a store from ambient AWS credentials (env vars, profile, or
    /// instance role).
    pub async fn from_env(bucket: String, region: String) -> Self {
        let config = aws_config::from_env()
            .region(Region::new(region.clone()))
            .load()
            .await;
        S3Store {
            client: Client::new(&config),
            bucket,
            region,
        }
    }

    /// Wrap an existing client. Used by tests against S3-compatible stores.
    pub fn with_client(client: Client, bucket: String, region: String) -> Self {
        S3Store {
            client,
            bucket,
            region,
        }
    }

    fn url_base(&self) -> String {
        format!("https://{}.s3.{}.amazonaws.com/", self.bucket, self.region)
    }

    fn url_for_key(&self, key: &str) -> String {
        format!("{}{key}", self.url_base())
    }

    /// Recover the object key from a reference this store produced.
    ///
    /// Accepts both full object URLs and bare keys (`images/...`,
    /// `videos/...`) so references survive a bucket rename as long as the
    /// key layout does.
    fn key_for_reference(&self, reference: &str) -> Result<String, MediaError> {
        if let Some(key) = reference.strip_prefix(&self.url_base()) {
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }
        let is_bare_key = [AssetKind::Image.prefix(), AssetKind::Video.prefix()]
            .iter()
            .any(|prefix| {
                reference
                    .strip_prefix(prefix)
                    .and_then(|rest| rest.strip_prefix('/'))
                    .is_some_and(|name| !name.is_empty())
            });
        if is_bare_key {
            return Ok(reference.to_string());
        }
        Err(MediaError::BadReference(reference.to_string()))
    }
}

#[async_trait]
impl MediaStore for S3Store {
    async fn store(
        &self,
        payload: Vec<u8>,
        kind: AssetKind,
        original_filename: &str,
    ) -> Result<String, MediaError> {
        let key = format!(
            "{}/{}-{}",
            kind.prefix(),
            Uuid::new_v4(),
            sanitize_filename(original_filename)
        );
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(payload))
            .send()
            .await
            .map_err(|e| MediaError::Store(format!("S3 put_object failed: {e}")))?;
        Ok(self.url_for_key(&key))
    }

    async fn release(&self, reference: &str) -> Result<(), MediaError> {
        let key = self.key_for_reference(reference)?;
        // S3 DeleteObject succeeds on a missing key, so release stays
        // idempotent without a head-object round trip.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| MediaError::Release {
                reference: reference.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, MediaError> {
        let mut refs = Vec::new();
        let mut continuation: Option<String> = None;
        loop {
            let mut request = self.client.list_objects_v2().bucket(&self.bucket);
            if let Some(token) = &continuation {
                request = request.continuation_token(token);
            }
            let response = request
                .send()
                .await
                .map_err(|e| MediaError::Store(format!("S3 list_objects_v2 failed: {e}")))?;

            for object in response.contents() {
                if let Some(key) = object.key() {
                    refs.push(self.url_for_key(key));
                }
            }

            if response.is_truncated() == Some(true) {
                continuation = response.next_continuation_token().map(str::to_string);
            } else {
                break;
            }
        }
        Ok(refs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{Builder, Credentials};

    /// A client that never talks to the network; only the pure
    /// reference/key mapping is exercised here.
    fn offline_store() -> S3Store {
        let credentials = Credentials::new("test", "test", None, None, "static");
        let config = Builder::new()
            .behavior_version_latest()
            .region(Region::new("eu-west-1"))
            .credentials_provider(credentials)
            .build();
        S3Store::with_client(
            Client::from_conf(config),
            "portfolio-media".to_string(),
            "eu-west-1".to_string(),
        )
    }

    #[test]
    fn url_round_trips_to_key() {
        let store = offline_store();
        let url = store.url_for_key("images/abc-logo.png");
        assert_eq!(
            url,
            "https://portfolio-media.s3.eu-west-1.amazonaws.com/images/abc-logo.png"
        );
        assert_eq!(
            store.key_for_reference(&url).unwrap(),
            "images/abc-logo.png"
        );
    }

    #[test]
    fn bare_keys_are_accepted() {
        let store = offline_store();
        assert_eq!(
            store.key_for_reference("videos/abc-demo.mp4").unwrap(),
            "videos/abc-demo.mp4"
        );
    }

    #[test]
    fn foreign_references_are_rejected() {
        let store = offline_store();
        for reference in [
            "https://elsewhere.example.com/images/x.png",
            "ftp://portfolio-media/images/x.png",
            "images/",
            "stuff/x.png",
        ] {
            assert!(
                store.key_for_reference(reference).is_err(),
                "reference {reference:?} must be rejected"
            );
        }
    }
}
