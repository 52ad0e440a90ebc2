use pace_llm::ToolDefinition;
use serde_json::json;

/// The fixed set of operations exposed to the model. Descriptions double as
/// the model's dispatch hints; schemas are provider-agnostic JSON Schema,
/// re-encoded per provider by `pace-llm`.
pub fn tool_catalog() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "read_knowledge_base".to_string(),
            description: "Read the current Knowledge Base for a process. Returns the full KB markdown content.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "process_id": { "type": "string", "description": "The process ID. Defaults to current process context." }
                }
            }),
        },
        ToolDefinition {
            name: "update_knowledge_base".to_string(),
            description: "Replace the entire Knowledge Base with new content. Use when user wants to overwrite or completely rewrite the KB.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "process_id": { "type": "string", "description": "The process ID." },
                    "content": { "type": "string", "description": "The full new markdown content for the KB." }
                },
                "required": ["content"]
            }),
        },
        ToolDefinition {
            name: "append_to_knowledge_base".to_string(),
            description: "Append new content to the end of the Knowledge Base, optionally under a new section heading.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "process_id": { "type": "string", "description": "The process ID." },
                    "content": { "type": "string", "description": "The markdown content to append." },
                    "section": { "type": "string", "description": "Optional section heading to add before the content." }
                },
                "required": ["content"]
            }),
        },
        ToolDefinition {
            name: "list_skills".to_string(),
            description: "List all available skills that Pace can execute. Returns skill names, descriptions, and example prompts.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "category": { "type": "string", "description": "Optional category filter: analytics, engineering, customer-success, sales, meetings, customer-ops, internal, search, utility" }
                }
            }),
        },
        ToolDefinition {
            name: "get_skill_details".to_string(),
            description: "Get full details for a specific skill including description, triggers, and example prompts.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "skill_name": { "type": "string", "description": "The skill name (e.g. 'reporting', 'data-query', 'weekly-changelog-pdf')" }
                },
                "required": ["skill_name"]
            }),
        },
        ToolDefinition {
            name: "update_skill".to_string(),
            description: "Update a skill's definition - change its description, triggers, example prompts, or enabled status. Changes are applied immediately to the skills database.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "skill_name": { "type": "string", "description": "The skill name to update." },
                    "updates": {
                        "type": "object",
                        "description": "Fields to update. Can include: title, description, category, triggers (array), example_prompts (array), enabled (boolean).",
                        "properties": {
                            "title": { "type": "string" },
                            "description": { "type": "string" },
                            "category": { "type": "string" },
                            "triggers": { "type": "array", "items": { "type": "string" } },
                            "example_prompts": { "type": "array", "items": { "type": "string" } },
                            "enabled": { "type": "boolean" }
                        }
                    }
                },
                "required": ["skill_name", "updates"]
            }),
        },
        ToolDefinition {
            name: "log_change".to_string(),
            description: "Log an action or change to the audit trail. Use this whenever you make a modification so we have a record.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "action": { "type": "string", "description": "What was done (e.g. 'updated_kb', 'modified_skill', 'queued_feature_request')" },
                    "entity_type": { "type": "string", "description": "What was changed: 'knowledge_base', 'skill', 'workflow', 'ui', 'feature_request'" },
                    "entity_name": { "type": "string", "description": "Name of the entity (e.g. 'Invoice Processing KB', 'reporting skill')" },
                    "details": { "type": "string", "description": "Human-readable description of the change." }
                },
                "required": ["action", "entity_type", "details"]
            }),
        },
        ToolDefinition {
            name: "queue_pending_change".to_string(),
            description: "Queue a change that requires the main Pace chat to apply (code deployments, GitHub changes, external API calls, new features). These get reviewed and applied from the main chat.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "change_type": { "type": "string", "description": "Type: 'code_change', 'deployment', 'feature_request', 'integration', 'external_api'" },
                    "description": { "type": "string", "description": "Clear description of what needs to be done." },
                    "details": { "type": "string", "description": "Technical details, specifications, or context needed to implement." },
                    "priority": { "type": "string", "enum": ["low", "medium", "high"], "description": "Priority level." }
                },
                "required": ["change_type", "description"]
            }),
        },
        ToolDefinition {
            name: "get_change_log".to_string(),
            description: "Retrieve recent changes from the audit log. Shows what actions the dashboard chat has taken.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "limit": { "type": "number", "description": "Number of recent entries to return. Default 10." }
                }
            }),
        },
        ToolDefinition {
            name: "get_pending_changes".to_string(),
            description: "List pending changes that are queued for the main Pace chat to review and apply.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "status": { "type": "string", "enum": ["pending", "approved", "applied", "rejected"], "description": "Filter by status. Default: all." }
                }
            }),
        },
    ]
}
