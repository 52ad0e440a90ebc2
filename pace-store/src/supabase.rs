use crate::error::{Result, StoreError};
use crate::traits::{DocumentStore, ListOptions, ObjectInfo, UploadOptions};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supabase Storage client.
///
/// Talks to the storage REST surface with the service-role key; the store is
/// eventually consistent and provides no cross-writer coordination, so
/// concurrent writers to the same key can clobber each other.
#[derive(Clone)]
pub struct SupabaseStore {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStore {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn new(base_url: &str, service_key: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(%e, "reqwest client build failed; falling back to default client");
                reqwest::Client::new()
            });
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{key}", self.base_url)
    }

    fn list_url(&self, bucket: &str) -> String {
        format!("{}/storage/v1/object/list/{bucket}", self.base_url)
    }
}

#[async_trait]
impl DocumentStore for SupabaseStore {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(self.object_url(bucket, key))
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::BAD_REQUEST {
            return Err(StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Http(format!(
                "download {bucket}/{key} status={status} body={body}"
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }

    #[tracing::instrument(level = "debug", skip(self, body, options), fields(bytes = body.len(), overwrite = options.overwrite))]
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        options: UploadOptions,
    ) -> Result<()> {
        let mut request = self
            .http
            .post(self.object_url(bucket, key))
            .bearer_auth(&self.service_key)
            .header("content-type", &options.content_type)
            .header("x-upsert", if options.overwrite { "true" } else { "false" });
        if let Some(cache_control) = &options.cache_control {
            request = request.header("cache-control", cache_control.as_str());
        }

        let response = request.body(body).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(StoreError::Conflict {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Http(format!(
                "upload {bucket}/{key} status={status} body={body}"
            )));
        }
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self, options))]
    async fn list(
        &self,
        bucket: &str,
        prefix: &str,
        options: ListOptions,
    ) -> Result<Vec<ObjectInfo>> {
        let request = ListRequest {
            prefix: prefix.to_string(),
            limit: options.limit,
            sort_by: SortBy {
                column: "created_at".to_string(),
                order: if options.newest_first { "desc" } else { "asc" }.to_string(),
            },
        };

        let response = self
            .http
            .post(self.list_url(bucket))
            .bearer_auth(&self.service_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::Http(format!(
                "list {bucket} prefix={prefix} status={status} body={body}"
            )));
        }

        let entries: Vec<ListEntry> = serde_json::from_str(&body)?;
        Ok(entries
            .into_iter()
            .map(|e| ObjectInfo {
                name: e.name,
                created_at: e.created_at,
            })
            .collect())
    }
}

#[derive(Debug, Serialize)]
struct ListRequest {
    prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
    #[serde(rename = "sortBy")]
    sort_by: SortBy,
}

#[derive(Debug, Serialize)]
struct SortBy {
    column: String,
    order: String,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    name: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}
