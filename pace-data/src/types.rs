use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_letter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    pub id: String,
    pub name: String,
}

/// One activity run as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub document_name: Option<String>,
    pub status: String,
    #[serde(default)]
    pub current_status_text: Option<String>,
    pub created_at: DateTime<Utc>,
}
