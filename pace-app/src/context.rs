//! System prompt assembly for the dashboard chat.
//!
//! The prompt is persona text plus three live context blocks (skills summary,
//! org/process listing, recent runs). The blocks are fetched concurrently and
//! each degrades on its own: a failed fetch shrinks the prompt, it never
//! fails the request.

use pace_data::DashboardDb;
use pace_store::{DocumentStore, buckets};
use pace_tools::{DEFAULT_PROCESS_ID, Skill};
use std::sync::Arc;

const RECENT_RUN_LIMIT: usize = 10;

/// The org/process the user is currently viewing, as reported by the client.
#[derive(Debug, Clone, Default)]
pub struct ChatScope {
    pub org_id: Option<String>,
    pub org_name: Option<String>,
    pub process_id: Option<String>,
    pub process_name: Option<String>,
}

pub struct ContextAssembler {
    store: Arc<dyn DocumentStore>,
    db: Arc<dyn DashboardDb>,
}

impl ContextAssembler {
    pub fn new(store: Arc<dyn DocumentStore>, db: Arc<dyn DashboardDb>) -> Self {
        Self { store, db }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn system_prompt(&self, scope: &ChatScope) -> String {
        let (skills_summary, org_listing, dashboard_state) = tokio::join!(
            self.skills_summary(),
            self.org_listing(),
            self.dashboard_state(scope.process_id.as_deref()),
        );
        format!(
            "{}{org_listing}{dashboard_state}",
            persona_prompt(scope, &skills_summary)
        )
    }

    async fn skills_summary(&self) -> String {
        let raw = match self.store.download_text(buckets::SKILLS, "index.json").await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(error = %e, "skills index unavailable for context");
                return "No skills loaded.".to_string();
            }
        };
        match serde_json::from_str::<Vec<Skill>>(&raw) {
            Ok(skills) => skills
                .iter()
                .filter(|s| s.enabled)
                .map(|s| format!("- **{}** ({}): {}", s.title, s.name, s.description))
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => {
                tracing::debug!(error = %e, "skills index unreadable for context");
                "Error loading skills.".to_string()
            }
        }
    }

    async fn dashboard_state(&self, process_id: Option<&str>) -> String {
        let runs = match self.db.recent_runs(process_id, RECENT_RUN_LIMIT).await {
            Ok(runs) => runs,
            Err(e) => {
                tracing::debug!(error = %e, "recent runs unavailable for context");
                return String::new();
            }
        };
        if runs.is_empty() {
            return String::new();
        }
        let mut ctx = String::from("\n\n--- Current Dashboard State ---\nRecent runs:\n");
        for run in &runs {
            ctx.push_str(&format!(
                "- {} | Status: {} | {} | {}\n",
                run.name,
                run.status,
                run.current_status_text.as_deref().unwrap_or(""),
                run.created_at.to_rfc3339(),
            ));
        }
        ctx
    }

    async fn org_listing(&self) -> String {
        let orgs = match self.db.organizations().await {
            Ok(orgs) => orgs,
            Err(e) => {
                tracing::debug!(error = %e, "organizations unavailable for context");
                return String::new();
            }
        };
        if orgs.is_empty() {
            return String::new();
        }
        let mut ctx = String::from("\n\n--- Available Organizations ---\n");
        for org in &orgs {
            ctx.push_str(&format!("\n### {} (ID: {})\n", org.name, org.id));
            let procs = self.db.processes(&org.id).await.unwrap_or_default();
            if procs.is_empty() {
                continue;
            }
            ctx.push_str("Processes:\n");
            for proc in &procs {
                let count = self.db.run_count(&proc.id).await.unwrap_or(0);
                ctx.push_str(&format!("- {} (ID: {}) — {count} runs\n", proc.name, proc.id));
            }
        }
        ctx
    }
}

fn persona_prompt(scope: &ChatScope, skills_summary: &str) -> String {
    let org_context = match &scope.org_name {
        Some(org_name) => format!(
            "\nCURRENT CONTEXT:\n- Organization: {org_name} (ID: {})\n- Process: {} (ID: {})\n\nThe user is viewing this org and process on the Pace Live Dashboard.",
            scope.org_id.as_deref().unwrap_or("none"),
            scope.process_name.as_deref().unwrap_or("none selected"),
            scope.process_id.as_deref().unwrap_or("none"),
        ),
        None => String::new(),
    };
    let default_process_name = scope.process_name.as_deref().unwrap_or("Invoice Processing");
    let default_process_id = scope.process_id.as_deref().unwrap_or(DEFAULT_PROCESS_ID);

    format!(
        r#"You are Pace, a digital employee at Zamp. You are embedded in the Pace Live Dashboard as an interactive assistant.

Your personality: Direct, warm, genuinely helpful. No emojis, no filler. You speak like a sharp colleague.
{org_context}

WHAT YOU CAN DO:

1. KNOWLEDGE BASE MANAGEMENT
   - Read, update, or append to the Knowledge Base for any process
   - Always use the tools — don't just describe what you would do

2. SKILLS MANAGEMENT
   - List all available skills (the same skills the main Pace chat uses)
   - View skill details (description, triggers, examples)
   - Update skill definitions (description, triggers, examples, enabled status)
   - Skills you update here are immediately available

3. DASHBOARD ACTIONS (applied immediately via Supabase)
   - KB changes, skill updates, workflow config changes
   - These take effect right away since the dashboard reads from Supabase

4. QUEUED CHANGES (for the main Pace chat to apply)
   - Code changes, deployments, new features, external API integrations
   - Queue these as pending changes — they'll be reviewed and applied from the main Pace chat

5. AUDIT TRAIL
   - Every change you make is logged automatically
   - You can view the change log and pending changes queue

6. CONTEXT & INTELLIGENCE
   - Answer questions about processes, runs, organizations on the dashboard
   - You share context with the main Pace chat via Supabase

AVAILABLE SKILLS:
{skills_summary}

IMPORTANT RULES:
- When the user asks to modify something, USE THE TOOLS. Don't just describe what you would do.
- Log every significant action for auditability.
- If a requested change requires code deployment or external access, queue it as a pending change.
- Be honest about what you can and can't do from the dashboard.
- Default process is {default_process_name} (ID: {default_process_id})."#
    )
}
