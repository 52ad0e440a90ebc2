use crate::error::{DataError, Result};
use crate::traits::DashboardDb;
use crate::types::{Organization, Process, RunSummary};
use async_trait::async_trait;

/// Supabase PostgREST client for the dashboard tables.
#[derive(Clone)]
pub struct PostgrestDb {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl PostgrestDb {
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

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let response = self
            .http
            .get(self.table_url(table))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DataError::Http(format!(
                "select {table} status={status} body={body}"
            )));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DashboardDb for PostgrestDb {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn recent_runs(
        &self,
        process_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<RunSummary>> {
        let mut query = vec![
            (
                "select",
                "id,name,document_name,status,current_status_text,created_at".to_string(),
            ),
            ("order", "updated_at.desc".to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(pid) = process_id {
            query.push(("process_id", format!("eq.{pid}")));
        }
        self.fetch("activity_runs", &query).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn organizations(&self) -> Result<Vec<Organization>> {
        self.fetch(
            "organizations",
            &[
                ("select", "id,name,avatar_letter".to_string()),
                ("order", "created_at.asc".to_string()),
            ],
        )
        .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn processes(&self, org_id: &str) -> Result<Vec<Process>> {
        self.fetch(
            "processes",
            &[
                ("select", "id,name".to_string()),
                ("org_id", format!("eq.{org_id}")),
                ("order", "created_at.asc".to_string()),
            ],
        )
        .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn run_count(&self, process_id: &str) -> Result<u64> {
        let response = self
            .http
            .head(self.table_url("activity_runs"))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("prefer", "count=exact")
            .query(&[
                ("select", "id".to_string()),
                ("process_id", format!("eq.{process_id}")),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http(format!(
                "count activity_runs status={status}"
            )));
        }
        let content_range = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                DataError::ResponseFormat("count response missing content-range".to_string())
            })?;
        parse_content_range_total(content_range)
    }
}

/// PostgREST reports exact counts as `items start-end/total`, e.g. `0-9/42`
/// or `*/0` for an empty table.
fn parse_content_range_total(header: &str) -> Result<u64> {
    let total = header
        .rsplit('/')
        .next()
        .ok_or_else(|| DataError::ResponseFormat(format!("bad content-range: {header}")))?;
    total
        .trim()
        .parse::<u64>()
        .map_err(|_| DataError::ResponseFormat(format!("bad content-range total: {header}")))
}
