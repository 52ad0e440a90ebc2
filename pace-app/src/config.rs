//! Dashboard service configuration loader.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub recordings: RecordingsConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub service_role_key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeysConfig {
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// Hard ceiling on model round trips per request.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
    /// Replayed client history is capped to this many recent turns.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_rounds() -> usize {
    10
}

fn default_max_history() -> usize {
    20
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_rounds: default_max_rounds(),
            max_history: default_max_history(),
        }
    }
}

/// S3 credentials for presigned run-recording URLs. Optional: when absent the
/// recording endpoint reports the credentials as unconfigured.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingsConfig {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_recordings_bucket")]
    pub bucket: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_recordings_bucket() -> String {
    "zamp-prd-us-selenium-grid-bucket".to_string()
}

impl Default for RecordingsConfig {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            region: default_region(),
            bucket: default_recordings_bucket(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_http_timeout_seconds")]
    pub http_timeout_seconds: u64,
    #[serde(default = "default_http_max_in_flight")]
    pub http_max_in_flight: usize,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8788".to_string()
}

fn default_http_timeout_seconds() -> u64 {
    120
}

fn default_http_max_in_flight() -> usize {
    64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            http_timeout_seconds: default_http_timeout_seconds(),
            http_max_in_flight: default_http_max_in_flight(),
        }
    }
}

impl DashboardConfig {
    pub async fn load(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let path = path.unwrap_or_else(default_config_path);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| anyhow::anyhow!("read config {}: {e}", path.display()))?;

        let mut cfg: DashboardConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("parse config {}: {e}", path.display()))?;

        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SUPABASE_URL") {
            if !v.trim().is_empty() {
                self.supabase.url = v;
            }
        }
        if let Ok(v) = std::env::var("SUPABASE_SERVICE_ROLE_KEY") {
            if !v.trim().is_empty() {
                self.supabase.service_role_key = v;
            }
        }
        if let Ok(v) = std::env::var("ANTHROPIC_API_KEY") {
            if !v.trim().is_empty() {
                self.keys.anthropic_api_key = Some(v);
            }
        }
        if let Ok(v) = std::env::var("OPENAI_API_KEY") {
            if !v.trim().is_empty() {
                self.keys.openai_api_key = Some(v);
            }
        }
        if let Ok(v) = std::env::var("PACEDASH_MODEL") {
            if !v.trim().is_empty() {
                self.chat.model = v;
            }
        }
        if let Ok(v) = std::env::var("AWS_S3_ACCESS_KEY_ID") {
            if !v.trim().is_empty() {
                self.recordings.access_key_id = Some(v);
            }
        }
        if let Ok(v) = std::env::var("AWS_S3_SECRET_ACCESS_KEY") {
            if !v.trim().is_empty() {
                self.recordings.secret_access_key = Some(v);
            }
        }
        if let Ok(v) = std::env::var("AWS_S3_REGION") {
            if !v.trim().is_empty() {
                self.recordings.region = v;
            }
        }
        if let Ok(v) = std::env::var("AWS_S3_BUCKET") {
            if !v.trim().is_empty() {
                self.recordings.bucket = v;
            }
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.supabase.url.trim().is_empty() {
            return Err(anyhow::anyhow!("supabase.url is required"));
        }
        if self.supabase.service_role_key.trim().is_empty() {
            return Err(anyhow::anyhow!("supabase.service_role_key is required"));
        }
        if self.chat.model.trim().is_empty() {
            return Err(anyhow::anyhow!("chat.model is required"));
        }
        if self.chat.max_rounds == 0 {
            return Err(anyhow::anyhow!("chat.max_rounds must be > 0"));
        }
        if self.api_key_for_model().is_none() {
            return Err(anyhow::anyhow!(
                "no API key configured for model {:?}",
                self.chat.model
            ));
        }
        if self.server.http_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("server.http_timeout_seconds must be > 0"));
        }
        Ok(())
    }

    pub fn api_key_for_model(&self) -> Option<String> {
        let model = self.chat.model.to_ascii_lowercase();
        if model.starts_with("claude-") {
            return self
                .keys
                .anthropic_api_key
                .clone()
                .filter(|s| !s.is_empty());
        }
        self.keys.openai_api_key.clone().filter(|s| !s.is_empty())
    }
}

pub fn default_config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".pacedash").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_chat_and_server_defaults() {
        let cfg: DashboardConfig = toml::from_str(
            r#"
            [supabase]
            url = "https://example.supabase.co"
            service_role_key = "service-key"

            [keys]
            anthropic_api_key = "sk-ant-test"
            "#,
        )
        .expect("config parses");

        assert_eq!(cfg.chat.model, "claude-sonnet-4-20250514");
        assert_eq!(cfg.chat.max_rounds, 10);
        assert_eq!(cfg.chat.max_history, 20);
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:8788");
        assert_eq!(cfg.recordings.region, "us-east-1");
        cfg.validate().expect("defaults validate");
    }

    #[test]
    fn api_key_follows_model_family() {
        let mut cfg: DashboardConfig = toml::from_str(
            r#"
            [supabase]
            url = "https://example.supabase.co"
            service_role_key = "service-key"

            [keys]
            anthropic_api_key = "sk-ant-test"
            openai_api_key = "sk-oai-test"
            "#,
        )
        .expect("config parses");

        assert_eq!(cfg.api_key_for_model().as_deref(), Some("sk-ant-test"));
        cfg.chat.model = "gpt-4.1".to_string();
        assert_eq!(cfg.api_key_for_model().as_deref(), Some("sk-oai-test"));
    }

    #[test]
    fn validation_rejects_model_without_matching_key() {
        let cfg: DashboardConfig = toml::from_str(
            r#"
            [supabase]
            url = "https://example.supabase.co"
            service_role_key = "service-key"

            [keys]
            openai_api_key = "sk-oai-test"
            "#,
        )
        .expect("config parses");

        let err = cfg.validate().expect_err("claude model needs anthropic key");
        assert!(err.to_string().contains("no API key configured"));
    }
}
