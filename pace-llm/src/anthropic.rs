use crate::error::{LlmError, Result};
use crate::types::{ChatMessage, ChatResponse, Role, ToolCall, ToolDefinition, Usage};
use serde::{Deserialize, Serialize};

const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(http: reqwest::Client, api_key: &str, model: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    #[tracing::instrument(level = "info", skip_all)]
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ChatResponse> {
        let req = AnthropicRequest::new(&self.model, messages, tools)?;

        let response = self
            .http
            .post(ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&req)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Http(format!(
                "anthropic chat status={status} body={body}"
            )));
        }

        let parsed: AnthropicResponse = serde_json::from_str(&body)?;
        parsed.try_into()
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<AnthropicTool>,
}

impl AnthropicRequest {
    fn new(model: &str, messages: &[ChatMessage], tools: &[ToolDefinition]) -> Result<Self> {
        let mut system = String::new();
        let mut out_messages = Vec::new();

        for m in messages {
            match m.role {
                Role::System => {
                    if !system.is_empty() {
                        system.push('\n');
                    }
                    system.push_str(m.content.trim());
                }
                Role::User => out_messages.push(to_user_message(m)),
                Role::Assistant => out_messages.push(to_assistant_message(m)),
                Role::Tool => out_messages.push(to_tool_result_message(m)),
            }
        }

        Ok(Self {
            model: model.to_string(),
            max_tokens: MAX_TOKENS,
            system,
            messages: out_messages,
            tools: tools.iter().map(to_anthropic_tool).collect(),
        })
    }
}

/// Anthropic nests the schema under `input_schema`; contrast with the flat
/// OpenAI function encoding in `openai.rs`.
#[derive(Debug, Serialize)]
struct AnthropicTool {
    name: String,
    description: String,
    input_schema: serde_json::Value,
}

fn to_anthropic_tool(t: &ToolDefinition) -> AnthropicTool {
    AnthropicTool {
        name: t.name.clone(),
        description: t.description.clone(),
        input_schema: t.parameters.clone(),
    }
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

fn to_user_message(m: &ChatMessage) -> AnthropicMessage {
    AnthropicMessage {
        role: "user".to_string(),
        content: vec![ContentBlock::Text {
            text: m.content.clone(),
        }],
    }
}

fn to_tool_result_message(m: &ChatMessage) -> AnthropicMessage {
    AnthropicMessage {
        role: "user".to_string(),
        content: vec![ContentBlock::ToolResult {
            tool_use_id: m.tool_call_id.clone().unwrap_or_default(),
            content: m.content.clone(),
        }],
    }
}

fn to_assistant_message(m: &ChatMessage) -> AnthropicMessage {
    let mut blocks = Vec::new();
    if !m.content.trim().is_empty() {
        blocks.push(ContentBlock::Text {
            text: m.content.clone(),
        });
    }
    for tc in &m.tool_calls {
        let input: serde_json::Value =
            serde_json::from_str(&tc.arguments).unwrap_or_else(|_| serde_json::json!({}));
        blocks.push(ContentBlock::ToolUse {
            id: tc.id.clone(),
            name: tc.name.clone(),
            input,
        });
    }
    AnthropicMessage {
        role: "assistant".to_string(),
        content: blocks,
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: String,
    #[serde(default)]
    usage: AnthropicUsage,
}

#[derive(Debug, Default, Deserialize)]
struct AnthropicUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

impl TryFrom<AnthropicResponse> for ChatResponse {
    type Error = LlmError;

    fn try_from(v: AnthropicResponse) -> Result<Self> {
        let mut content = String::new();
        let mut tool_calls = Vec::new();

        for block in v.content {
            match block {
                ContentBlock::Text { text } => content.push_str(&text),
                ContentBlock::ToolUse { id, name, input } => {
                    tool_calls.push(ToolCall {
                        id,
                        name,
                        arguments: serde_json::to_string(&input)?,
                    });
                }
                ContentBlock::ToolResult { .. } => {}
            }
        }

        Ok(ChatResponse {
            message: ChatMessage {
                role: Role::Assistant,
                content,
                tool_calls,
                tool_call_id: None,
            },
            usage: Usage {
                prompt_tokens: v.usage.input_tokens as u32,
                completion_tokens: v.usage.output_tokens as u32,
            },
            finish_reason: v.stop_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool_defs() -> Vec<ToolDefinition> {
        vec![ToolDefinition {
            name: "read_knowledge_base".to_string(),
            description: "Read the KB.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": { "process_id": { "type": "string" } }
            }),
        }]
    }

    #[test]
    fn system_messages_fold_into_system_field() {
        let messages = vec![
            ChatMessage::system("You are Pace."),
            ChatMessage::user("hello"),
        ];
        let req = AnthropicRequest::new("claude-sonnet-4-20250514", &messages, &[])
            .expect("request builds");
        assert_eq!(req.system, "You are Pace.");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
    }

    #[test]
    fn tool_results_become_user_role_tool_result_blocks() {
        let messages = vec![
            ChatMessage::user("show me the KB"),
            ChatMessage {
                role: Role::Assistant,
                content: String::new(),
                tool_calls: vec![ToolCall {
                    id: "tu_1".to_string(),
                    name: "read_knowledge_base".to_string(),
                    arguments: "{}".to_string(),
                }],
                tool_call_id: None,
            },
            ChatMessage::tool_result("tu_1", r##"{"content":"# KB"}"##),
        ];
        let req = AnthropicRequest::new("claude-sonnet-4-20250514", &messages, &tool_defs())
            .expect("request builds");
        let encoded = serde_json::to_value(&req).expect("serializes");

        let assistant = &encoded["messages"][1];
        assert_eq!(assistant["role"], "assistant");
        assert_eq!(assistant["content"][0]["type"], "tool_use");
        assert_eq!(assistant["content"][0]["id"], "tu_1");

        let result = &encoded["messages"][2];
        assert_eq!(result["role"], "user");
        assert_eq!(result["content"][0]["type"], "tool_result");
        assert_eq!(result["content"][0]["tool_use_id"], "tu_1");
    }

    #[test]
    fn tools_are_encoded_with_nested_input_schema() {
        let messages = vec![ChatMessage::user("hi")];
        let req = AnthropicRequest::new("claude-sonnet-4-20250514", &messages, &tool_defs())
            .expect("request builds");
        let encoded = serde_json::to_value(&req).expect("serializes");
        assert_eq!(encoded["tools"][0]["name"], "read_knowledge_base");
        assert_eq!(encoded["tools"][0]["input_schema"]["type"], "object");
    }

    #[test]
    fn response_text_and_tool_use_blocks_are_extracted() {
        let raw = json!({
            "content": [
                { "type": "text", "text": "Let me check. " },
                { "type": "tool_use", "id": "tu_9", "name": "list_skills", "input": {} }
            ],
            "stop_reason": "tool_use",
            "usage": { "input_tokens": 10, "output_tokens": 5 }
        });
        let parsed: AnthropicResponse =
            serde_json::from_value(raw).expect("response parses");
        let resp: ChatResponse = parsed.try_into().expect("converts");
        assert_eq!(resp.message.content, "Let me check. ");
        assert_eq!(resp.message.tool_calls.len(), 1);
        assert_eq!(resp.message.tool_calls[0].name, "list_skills");
        assert_eq!(resp.finish_reason, "tool_use");
    }
}
