use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use super::{ObjectStorage, StorageError};

/// Supabase Storage REST client for one bucket
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: Url,
    key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(
        base_url: &str,
        key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let base_url =
            Url::parse(base_url).map_err(|e| StorageError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            key: key.into(),
            bucket: bucket.into(),
        })
    }

    /// `<base>/storage/v1/object/<bucket>/<path...>` with each segment escaped
    pub fn object_url(&self, path: &str) -> Result<Url, StorageError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StorageError::InvalidUrl(self.base_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["storage", "v1", "object", self.bucket.as_str()])
                .extend(path.split('/'));
        }
        Ok(url)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = self.object_url(path)?;
        let size = bytes.len();

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.key)
            .header("apikey", &self.key)
            .header("x-upsert", "true")
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        debug!(bucket = %self.bucket, path, size, "Uploaded object");
        Ok(())
    }
}
