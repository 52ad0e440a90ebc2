use crate::kb;
use crate::records::{ChangeLogEntry, PendingChange, Priority, Skill};
use pace_store::{DocumentStore, ListOptions, StoreError, UploadOptions, buckets};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;

const CHANGE_LOG_SCAN_LIMIT: usize = 100;
const PENDING_CHANGES_SCAN_LIMIT: usize = 50;
const DEFAULT_CHANGE_LOG_LIMIT: usize = 10;

type ToolResult = std::result::Result<Value, ToolError>;

#[derive(Debug, Error)]
enum ToolError {
    #[error("{0} is required")]
    MissingArgument(&'static str),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Executes tool calls against the document store.
///
/// `execute` never fails and never panics: every outcome, including unknown
/// tool names and storage errors, is reported as a JSON value. Mutations of
/// the knowledge base and skills write an implicit audit entry afterwards;
/// that secondary write is best-effort and its failure does not demote the
/// primary result.
pub struct ToolExecutor {
    store: Arc<dyn DocumentStore>,
}

impl ToolExecutor {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(level = "info", skip(self, args), fields(tool = %name))]
    pub async fn execute(&self, name: &str, args: &Value, default_process_id: Option<&str>) -> Value {
        let pid = effective_process_id(args, default_process_id);
        let result = match name {
            "read_knowledge_base" => self.read_knowledge_base(&pid).await,
            "update_knowledge_base" => self.update_knowledge_base(args, &pid).await,
            "append_to_knowledge_base" => self.append_to_knowledge_base(args, &pid).await,
            "list_skills" => self.list_skills(args).await,
            "get_skill_details" => self.get_skill_details(args).await,
            "update_skill" => self.update_skill(args).await,
            "log_change" => self.log_change(args).await,
            "queue_pending_change" => self.queue_pending_change(args).await,
            "get_change_log" => self.get_change_log(args).await,
            "get_pending_changes" => self.get_pending_changes(args).await,
            other => Ok(json!({ "error": format!("Unknown tool: {other}") })),
        };

        match result {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "tool call failed");
                json!({ "error": e.to_string() })
            }
        }
    }

    async fn read_knowledge_base(&self, pid: &str) -> ToolResult {
        match kb::read(self.store.as_ref(), pid).await {
            Ok(content) => Ok(json!({ "content": content, "process_id": pid })),
            Err(e) if e.is_not_found() => Ok(json!({ "error": format!("KB not found: {e}") })),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_knowledge_base(&self, args: &Value, pid: &str) -> ToolResult {
        let content = require_str(args, "content")?;
        kb::replace(self.store.as_ref(), pid, &content).await?;
        self.log_change_best_effort(
            "updated_kb",
            "knowledge_base",
            &format!("Process {pid} KB"),
            "Knowledge base content was replaced.",
        )
        .await;
        Ok(json!({ "success": true, "action": "replaced", "process_id": pid }))
    }

    async fn append_to_knowledge_base(&self, args: &Value, pid: &str) -> ToolResult {
        let content = require_str(args, "content")?;
        let section = optional_str(args, "section");
        kb::append(self.store.as_ref(), pid, &content, section.as_deref()).await?;
        let details = match &section {
            Some(s) => format!("Appended content under section: {s}."),
            None => "Appended content.".to_string(),
        };
        self.log_change_best_effort(
            "appended_kb",
            "knowledge_base",
            &format!("Process {pid} KB"),
            &details,
        )
        .await;
        Ok(json!({ "success": true, "action": "appended", "process_id": pid }))
    }

    async fn list_skills(&self, args: &Value) -> ToolResult {
        let raw = self
            .store
            .download_text(buckets::SKILLS, "index.json")
            .await?;
        let mut skills: Vec<Skill> = serde_json::from_str(&raw)?;
        if let Some(category) = optional_str(args, "category") {
            skills.retain(|s| s.category == category);
        }
        let summaries: Vec<Value> = skills
            .iter()
            .map(|s| {
                json!({
                    "name": s.name,
                    "title": s.title,
                    "description": s.description,
                    "category": s.category,
                    "enabled": s.enabled,
                })
            })
            .collect();
        Ok(json!({ "skills": summaries, "count": skills.len() }))
    }

    async fn get_skill_details(&self, args: &Value) -> ToolResult {
        let skill_name = require_str(args, "skill_name")?;
        match self
            .store
            .download_text(buckets::SKILLS, &format!("{skill_name}.json"))
            .await
        {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.is_not_found() => {
                Ok(json!({ "error": format!("Skill not found: {skill_name}") }))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Two writes, no transaction: the individual record first, then the
    /// index. A failed index *download* skips the mirror update entirely,
    /// so the index can drift from the records. Known gap, kept as-is.
    async fn update_skill(&self, args: &Value) -> ToolResult {
        let skill_name = require_str(args, "skill_name")?;
        let Some(updates) = args.get("updates").and_then(Value::as_object) else {
            return Err(ToolError::MissingArgument("updates"));
        };

        let record_key = format!("{skill_name}.json");
        let raw = match self.store.download_text(buckets::SKILLS, &record_key).await {
            Ok(raw) => raw,
            Err(e) if e.is_not_found() => {
                return Ok(json!({ "error": format!("Skill not found: {skill_name}") }));
            }
            Err(e) => return Err(e.into()),
        };
        let mut skill: Value = serde_json::from_str(&raw)?;
        if let Some(target) = skill.as_object_mut() {
            for (key, value) in updates {
                target.insert(key.clone(), value.clone());
            }
        }

        self.store
            .upload(
                buckets::SKILLS,
                &record_key,
                serde_json::to_vec_pretty(&skill)?,
                UploadOptions::upsert("application/json"),
            )
            .await?;

        self.mirror_skill_into_index(&skill_name, &skill).await;

        let updated_fields: Vec<&String> = updates.keys().collect();
        self.log_change_best_effort(
            "updated_skill",
            "skill",
            &skill_name,
            &format!(
                "Updated fields: {}",
                updated_fields
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )
        .await;

        Ok(json!({
            "success": true,
            "skill_name": skill_name,
            "updated_fields": updated_fields,
        }))
    }

    async fn mirror_skill_into_index(&self, skill_name: &str, updated: &Value) {
        let raw = match self.store.download_text(buckets::SKILLS, "index.json").await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(error = %e, "skill index unavailable; skipping mirror update");
                return;
            }
        };
        let mut index: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(index) => index,
            Err(e) => {
                tracing::debug!(error = %e, "skill index unreadable; skipping mirror update");
                return;
            }
        };
        for entry in index.iter_mut() {
            if entry.get("name").and_then(Value::as_str) == Some(skill_name) {
                *entry = updated.clone();
            }
        }
        let body = match serde_json::to_vec_pretty(&index) {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(error = %e, "skill index serialization failed");
                return;
            }
        };
        if let Err(e) = self
            .store
            .upload(
                buckets::SKILLS,
                "index.json",
                body,
                UploadOptions::upsert("application/json"),
            )
            .await
        {
            tracing::debug!(error = %e, "skill index write failed; records and index may drift");
        }
    }

    async fn log_change(&self, args: &Value) -> ToolResult {
        let action = require_str(args, "action")?;
        let entity_type = require_str(args, "entity_type")?;
        let entity_name = optional_str(args, "entity_name").unwrap_or_default();
        let details = optional_str(args, "details").unwrap_or_default();

        let entry = ChangeLogEntry::new(&action, &entity_type, &entity_name, &details);
        self.write_change_log(&entry).await?;
        Ok(json!({ "success": true, "id": entry.id }))
    }

    async fn queue_pending_change(&self, args: &Value) -> ToolResult {
        let change_type = require_str(args, "change_type")?;
        let description = require_str(args, "description")?;
        let details = optional_str(args, "details").unwrap_or_default();
        let priority = optional_str(args, "priority")
            .and_then(|p| serde_json::from_value(Value::String(p)).ok())
            .unwrap_or(Priority::Medium);

        let change = PendingChange::new(&change_type, &description, &details, priority);
        self.store
            .upload(
                buckets::PENDING_CHANGES,
                &change.storage_key(),
                serde_json::to_vec_pretty(&change)?,
                UploadOptions::create_only("application/json"),
            )
            .await?;

        self.log_change_best_effort("queued_change", "pending_change", &change_type, &description)
            .await;
        Ok(json!({ "success": true, "id": change.id, "status": "pending" }))
    }

    async fn get_change_log(&self, args: &Value) -> ToolResult {
        let limit = args
            .get("limit")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_CHANGE_LOG_LIMIT);

        let files = self
            .store
            .list(
                buckets::CHANGE_LOG,
                "",
                ListOptions {
                    limit: Some(CHANGE_LOG_SCAN_LIMIT),
                    newest_first: true,
                },
            )
            .await?;

        let mut entries = Vec::new();
        for file in files.iter().take(limit) {
            match self.store.download_text(buckets::CHANGE_LOG, &file.name).await {
                Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => tracing::debug!(name = %file.name, error = %e, "skipping unreadable change-log entry"),
                },
                Err(e) => tracing::debug!(name = %file.name, error = %e, "skipping unreadable change-log entry"),
            }
        }
        Ok(json!({ "count": entries.len(), "entries": entries }))
    }

    async fn get_pending_changes(&self, args: &Value) -> ToolResult {
        let status_filter = optional_str(args, "status");
        let files = self
            .store
            .list(
                buckets::PENDING_CHANGES,
                "",
                ListOptions {
                    limit: Some(PENDING_CHANGES_SCAN_LIMIT),
                    newest_first: true,
                },
            )
            .await?;

        let mut changes = Vec::new();
        for file in &files {
            let raw = match self
                .store
                .download_text(buckets::PENDING_CHANGES, &file.name)
                .await
            {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::debug!(name = %file.name, error = %e, "skipping unreadable pending change");
                    continue;
                }
            };
            let change: Value = match serde_json::from_str(&raw) {
                Ok(change) => change,
                Err(e) => {
                    tracing::debug!(name = %file.name, error = %e, "skipping unreadable pending change");
                    continue;
                }
            };
            let matches = status_filter
                .as_deref()
                .is_none_or(|s| change.get("status").and_then(Value::as_str) == Some(s));
            if matches {
                changes.push(change);
            }
        }
        Ok(json!({ "count": changes.len(), "changes": changes }))
    }

    async fn write_change_log(&self, entry: &ChangeLogEntry) -> std::result::Result<(), ToolError> {
        self.store
            .upload(
                buckets::CHANGE_LOG,
                &entry.storage_key(),
                serde_json::to_vec_pretty(entry)?,
                UploadOptions::create_only("application/json"),
            )
            .await?;
        Ok(())
    }

    /// Implicit audit write after a successful mutation. Fire-and-continue:
    /// the primary result stands even when this write fails.
    async fn log_change_best_effort(
        &self,
        action: &str,
        entity_type: &str,
        entity_name: &str,
        details: &str,
    ) {
        let entry = ChangeLogEntry::new(action, entity_type, entity_name, details);
        if let Err(e) = self.write_change_log(&entry).await {
            tracing::warn!(action, error = %e, "implicit change-log write failed");
        }
    }
}

fn effective_process_id(args: &Value, default_process_id: Option<&str>) -> String {
    let non_empty = |pid: &&str| !pid.trim().is_empty();
    args.get("process_id")
        .and_then(Value::as_str)
        .filter(non_empty)
        .or_else(|| default_process_id.filter(non_empty))
        .unwrap_or(crate::DEFAULT_PROCESS_ID)
        .to_string()
}

fn require_str(args: &Value, key: &'static str) -> std::result::Result<String, ToolError> {
    match args.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(ToolError::MissingArgument(key)),
    }
}

fn optional_str(args: &Value, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait_shim::FailingChangeLogStore;
    use pace_store::MemoryStore;

    fn executor() -> (Arc<MemoryStore>, ToolExecutor) {
        let store = Arc::new(MemoryStore::new());
        let executor = ToolExecutor::new(store.clone());
        (store, executor)
    }

    async fn seed_skills(store: &MemoryStore) {
        let reporting = json!({
            "name": "reporting",
            "title": "Reporting",
            "description": "Builds weekly reports.",
            "category": "analytics",
            "triggers": ["weekly report"],
            "example_prompts": ["build my weekly report"],
            "enabled": true
        });
        let data_query = json!({
            "name": "data-query",
            "title": "Data Query",
            "description": "Answers questions from datasets.",
            "category": "analytics",
            "enabled": true
        });
        store
            .upload(
                buckets::SKILLS,
                "reporting.json",
                serde_json::to_vec_pretty(&reporting).unwrap(),
                UploadOptions::upsert("application/json"),
            )
            .await
            .unwrap();
        store
            .upload(
                buckets::SKILLS,
                "index.json",
                serde_json::to_vec_pretty(&json!([reporting, data_query])).unwrap(),
                UploadOptions::upsert("application/json"),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_tool_returns_structured_error() {
        let (_, executor) = executor();
        let out = executor.execute("launch_rocket", &json!({}), None).await;
        assert_eq!(out["error"], "Unknown tool: launch_rocket");
    }

    #[tokio::test]
    async fn read_missing_kb_reports_not_found_as_data() {
        let (_, executor) = executor();
        let out = executor
            .execute("read_knowledge_base", &json!({}), Some("p1"))
            .await;
        let message = out["error"].as_str().expect("error is a string");
        assert!(message.starts_with("KB not found:"), "got: {message}");
    }

    #[tokio::test]
    async fn update_then_read_round_trips_exactly() {
        let (_, executor) = executor();
        let out = executor
            .execute(
                "update_knowledge_base",
                &json!({ "content": "# Invoice rules\n\nPay net-30." }),
                Some("p1"),
            )
            .await;
        assert_eq!(out["success"], true);
        assert_eq!(out["action"], "replaced");
        assert_eq!(out["process_id"], "p1");

        let read = executor
            .execute("read_knowledge_base", &json!({}), Some("p1"))
            .await;
        assert_eq!(read["content"], "# Invoice rules\n\nPay net-30.");
    }

    #[tokio::test]
    async fn append_twice_never_loses_or_reorders_prior_text() {
        let (_, executor) = executor();
        executor
            .execute("update_knowledge_base", &json!({ "content": "base" }), Some("p1"))
            .await;
        executor
            .execute(
                "append_to_knowledge_base",
                &json!({ "content": "c1" }),
                Some("p1"),
            )
            .await;
        executor
            .execute(
                "append_to_knowledge_base",
                &json!({ "content": "c2", "section": "Edge cases" }),
                Some("p1"),
            )
            .await;

        let read = executor
            .execute("read_knowledge_base", &json!({}), Some("p1"))
            .await;
        assert_eq!(read["content"], "base\n\nc1\n\n## Edge cases\n\nc2");
    }

    #[tokio::test]
    async fn kb_mutation_writes_implicit_audit_entry() {
        let (store, executor) = executor();
        executor
            .execute("update_knowledge_base", &json!({ "content": "x" }), Some("p1"))
            .await;

        let files = store
            .list(buckets::CHANGE_LOG, "", ListOptions::default())
            .await
            .unwrap();
        assert_eq!(files.len(), 1);
        let raw = store.download(buckets::CHANGE_LOG, &files[0].name).await.unwrap();
        let entry: Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(entry["action"], "updated_kb");
        assert_eq!(entry["entity_type"], "knowledge_base");
        assert_eq!(entry["performed_by"], "dashboard-chat");
    }

    #[tokio::test]
    async fn implicit_audit_failure_does_not_demote_primary_success() {
        let store = Arc::new(FailingChangeLogStore::default());
        let executor = ToolExecutor::new(store);
        let out = executor
            .execute("update_knowledge_base", &json!({ "content": "x" }), Some("p1"))
            .await;
        assert_eq!(out["success"], true);
        assert_eq!(out["action"], "replaced");
    }

    #[tokio::test]
    async fn missing_required_argument_is_a_structured_error() {
        let (_, executor) = executor();
        let out = executor
            .execute("update_knowledge_base", &json!({}), Some("p1"))
            .await;
        assert_eq!(out["error"], "content is required");
    }

    #[tokio::test]
    async fn list_skills_filters_by_category_and_reports_enabled() {
        let (store, executor) = executor();
        seed_skills(&store).await;
        let out = executor
            .execute("list_skills", &json!({ "category": "analytics" }), None)
            .await;
        assert_eq!(out["count"], 2);
        assert_eq!(out["skills"][0]["name"], "reporting");
        assert_eq!(out["skills"][0]["enabled"], true);

        let none = executor
            .execute("list_skills", &json!({ "category": "sales" }), None)
            .await;
        assert_eq!(none["count"], 0);
    }

    #[tokio::test]
    async fn get_skill_details_returns_full_record_or_not_found() {
        let (store, executor) = executor();
        seed_skills(&store).await;
        let out = executor
            .execute("get_skill_details", &json!({ "skill_name": "reporting" }), None)
            .await;
        assert_eq!(out["title"], "Reporting");
        assert_eq!(out["triggers"][0], "weekly report");

        let missing = executor
            .execute("get_skill_details", &json!({ "skill_name": "nope" }), None)
            .await;
        assert_eq!(missing["error"], "Skill not found: nope");
    }

    #[tokio::test]
    async fn update_skill_updates_both_record_and_index() {
        let (store, executor) = executor();
        seed_skills(&store).await;
        let out = executor
            .execute(
                "update_skill",
                &json!({ "skill_name": "reporting", "updates": { "enabled": false } }),
                None,
            )
            .await;
        assert_eq!(out["success"], true);
        assert_eq!(out["updated_fields"][0], "enabled");

        // Both copies must reflect the change, asserted independently.
        let record: Value = serde_json::from_slice(
            &store.download(buckets::SKILLS, "reporting.json").await.unwrap(),
        )
        .unwrap();
        assert_eq!(record["enabled"], false);
        assert_eq!(record["title"], "Reporting");

        let index: Vec<Value> = serde_json::from_slice(
            &store.download(buckets::SKILLS, "index.json").await.unwrap(),
        )
        .unwrap();
        let mirrored = index
            .iter()
            .find(|s| s["name"] == "reporting")
            .expect("reporting stays in index");
        assert_eq!(mirrored["enabled"], false);
        let untouched = index
            .iter()
            .find(|s| s["name"] == "data-query")
            .expect("other skills stay in index");
        assert_eq!(untouched["enabled"], true);
    }

    #[tokio::test]
    async fn update_skill_without_index_still_succeeds() {
        let (store, executor) = executor();
        let record = json!({ "name": "reporting", "title": "Reporting",
            "description": "d", "category": "analytics", "enabled": true });
        store
            .upload(
                buckets::SKILLS,
                "reporting.json",
                serde_json::to_vec_pretty(&record).unwrap(),
                UploadOptions::upsert("application/json"),
            )
            .await
            .unwrap();

        let out = executor
            .execute(
                "update_skill",
                &json!({ "skill_name": "reporting", "updates": { "title": "Reports" } }),
                None,
            )
            .await;
        assert_eq!(out["success"], true);
        assert!(
            store.download(buckets::SKILLS, "index.json").await.is_err(),
            "index must not be created as a side effect"
        );
    }

    #[tokio::test]
    async fn queue_pending_change_applies_defaults() {
        let (store, executor) = executor();
        let out = executor
            .execute(
                "queue_pending_change",
                &json!({ "change_type": "feature_request", "description": "Add CSV export" }),
                None,
            )
            .await;
        assert_eq!(out["success"], true);
        assert_eq!(out["status"], "pending");

        let id = out["id"].as_str().expect("id is present");
        let raw = store
            .download(buckets::PENDING_CHANGES, &format!("{id}.json"))
            .await
            .unwrap();
        let change: Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(change["priority"], "medium");
        assert_eq!(change["status"], "pending");
        assert_eq!(change["details"], "");
        assert_eq!(change["requested_by"], "dashboard-chat");
    }

    #[tokio::test]
    async fn get_change_log_caps_at_requested_limit() {
        let (_, executor) = executor();
        for i in 0..12 {
            let out = executor
                .execute(
                    "log_change",
                    &json!({
                        "action": format!("action_{i}"),
                        "entity_type": "workflow",
                        "details": "d"
                    }),
                    None,
                )
                .await;
            assert_eq!(out["success"], true);
        }

        let defaulted = executor.execute("get_change_log", &json!({}), None).await;
        assert_eq!(defaulted["count"], 10);

        let limited = executor
            .execute("get_change_log", &json!({ "limit": 3 }), None)
            .await;
        assert_eq!(limited["count"], 3);
        assert_eq!(limited["entries"][0]["action"], "action_11");
    }

    #[tokio::test]
    async fn get_pending_changes_filters_by_status() {
        let (store, executor) = executor();
        executor
            .execute(
                "queue_pending_change",
                &json!({ "change_type": "deployment", "description": "ship it" }),
                None,
            )
            .await;
        // A change already applied by the external reviewer.
        store
            .upload(
                buckets::PENDING_CHANGES,
                "11111111-1111-1111-1111-111111111111.json",
                serde_json::to_vec_pretty(&json!({
                    "id": "11111111-1111-1111-1111-111111111111",
                    "change_type": "integration",
                    "description": "done already",
                    "details": "",
                    "priority": "high",
                    "status": "applied",
                    "requested_by": "dashboard-chat",
                    "created_at": "2026-08-30T10:00:00Z"
                }))
                .unwrap(),
                UploadOptions::create_only("application/json"),
            )
            .await
            .unwrap();

        let all = executor.execute("get_pending_changes", &json!({}), None).await;
        assert_eq!(all["count"], 2);

        let pending = executor
            .execute("get_pending_changes", &json!({ "status": "pending" }), None)
            .await;
        assert_eq!(pending["count"], 1);
        assert_eq!(pending["changes"][0]["status"], "pending");
    }

    #[test]
    fn process_id_resolution_prefers_args_then_caller_default() {
        let args = json!({ "process_id": "from-args" });
        assert_eq!(effective_process_id(&args, Some("from-caller")), "from-args");
        assert_eq!(
            effective_process_id(&json!({}), Some("from-caller")),
            "from-caller"
        );
        assert_eq!(
            effective_process_id(&json!({}), None),
            crate::DEFAULT_PROCESS_ID
        );
    }

    mod async_trait_shim {
        use super::*;
        use async_trait::async_trait;
        use pace_store::{ObjectInfo, Result as StoreResult};

        /// Delegates to a MemoryStore but refuses change-log writes,
        /// to prove the implicit audit write is fire-and-continue.
        #[derive(Default)]
        pub struct FailingChangeLogStore {
            inner: MemoryStore,
        }

        #[async_trait]
        impl DocumentStore for FailingChangeLogStore {
            async fn download(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
                self.inner.download(bucket, key).await
            }

            async fn upload(
                &self,
                bucket: &str,
                key: &str,
                body: Vec<u8>,
                options: UploadOptions,
            ) -> StoreResult<()> {
                if bucket == buckets::CHANGE_LOG {
                    return Err(StoreError::Http("change-log unavailable".to_string()));
                }
                self.inner.upload(bucket, key, body, options).await
            }

            async fn list(
                &self,
                bucket: &str,
                prefix: &str,
                options: ListOptions,
            ) -> StoreResult<Vec<ObjectInfo>> {
                self.inner.list(bucket, prefix, options).await
            }
        }
    }
}
