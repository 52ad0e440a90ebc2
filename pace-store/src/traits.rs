use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Upload behavior for a single object write.
///
/// The overwrite flag carries the per-bucket policy: knowledge-base and
/// skills writes are idempotent upserts, while audit-log and pending-change
/// writes are create-only and treat a key collision as a hard failure.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub content_type: String,
    pub overwrite: bool,
    pub cache_control: Option<String>,
}

impl UploadOptions {
    pub fn upsert(content_type: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            overwrite: true,
            cache_control: Some("no-cache".to_string()),
        }
    }

    pub fn create_only(content_type: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            overwrite: false,
            cache_control: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub limit: Option<usize>,
    /// Sort by creation time, newest first.
    pub newest_first: bool,
}

#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        options: UploadOptions,
    ) -> Result<()>;

    async fn list(
        &self,
        bucket: &str,
        prefix: &str,
        options: ListOptions,
    ) -> Result<Vec<ObjectInfo>>;
}

impl dyn DocumentStore + '_ {
    /// Download and decode a UTF-8 text object.
    pub async fn download_text(&self, bucket: &str, key: &str) -> Result<String> {
        let bytes = self.download(bucket, key).await?;
        String::from_utf8(bytes).map_err(|e| {
            crate::StoreError::ResponseFormat(format!("{bucket}/{key} is not utf-8: {e}"))
        })
    }
}
