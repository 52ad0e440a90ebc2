use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named capability descriptor, stored at `skills/{name}.json` and
/// mirrored in `skills/index.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub example_prompts: Vec<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Immutable audit record; written once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_name: String,
    pub details: String,
    pub performed_by: String,
    pub created_at: DateTime<Utc>,
}

impl ChangeLogEntry {
    pub fn new(action: &str, entity_type: &str, entity_name: &str, details: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_name: entity_name.to_string(),
            details: details.to_string(),
            performed_by: crate::CHAT_IDENTITY.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Object key whose lexicographic order matches chronological order.
    pub fn storage_key(&self) -> String {
        let id = self.id.to_string();
        format!(
            "{}_{}.json",
            sanitize_timestamp(&self.created_at),
            &id[..8]
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Pending,
    Approved,
    Applied,
    Rejected,
}

/// Work the dashboard chat cannot perform itself, queued for an external
/// reviewer. Status transitions happen outside this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingChange {
    pub id: Uuid,
    pub change_type: String,
    pub description: String,
    pub details: String,
    pub priority: Priority,
    pub status: ChangeStatus,
    pub requested_by: String,
    pub created_at: DateTime<Utc>,
}

impl PendingChange {
    pub fn new(change_type: &str, description: &str, details: &str, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            change_type: change_type.to_string(),
            description: description.to_string(),
            details: details.to_string(),
            priority,
            status: ChangeStatus::Pending,
            requested_by: crate::CHAT_IDENTITY.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn storage_key(&self) -> String {
        format!("{}.json", self.id)
    }
}

/// ISO-8601 timestamp with `:` and `.` replaced so it can serve as a file
/// name fragment, e.g. `2026-08-31T12-34-56-789Z`.
pub(crate) fn sanitize_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-")
}
