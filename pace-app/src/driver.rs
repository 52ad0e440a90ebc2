//! The chat tool-use loop.
//!
//! One `/api/chat` request drives one loop: call the provider, execute any
//! requested tools, feed the results back, repeat until the model answers in
//! plain text or the round budget runs out. Budget exhaustion is not an
//! error; the caller gets a fixed fallback answer.

use chrono::Utc;
use pace_llm::{ChatMessage, ChatProvider, ToolDefinition};
use pace_store::{DocumentStore, UploadOptions, buckets};
use pace_tools::{CHAT_IDENTITY, ToolExecutor, tool_catalog};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

const FALLBACK_RESPONSE: &str =
    "I processed your request but couldn't generate a text response.";

/// One replayed turn of client-side history. Anything that is not an
/// assistant turn is replayed as a user turn.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

pub struct ConversationDriver {
    provider: Arc<dyn ChatProvider>,
    executor: ToolExecutor,
    store: Arc<dyn DocumentStore>,
    catalog: Vec<ToolDefinition>,
    max_rounds: usize,
    max_history: usize,
}

impl ConversationDriver {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        executor: ToolExecutor,
        store: Arc<dyn DocumentStore>,
        max_rounds: usize,
        max_history: usize,
    ) -> Self {
        Self {
            provider,
            executor,
            store,
            catalog: tool_catalog(),
            max_rounds,
            max_history,
        }
    }

    /// Run one exchange to completion and return the final answer text.
    /// Provider/transport failure is the only error path.
    #[tracing::instrument(level = "info", skip_all)]
    pub async fn run(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        message: &str,
        process_id: Option<&str>,
    ) -> pace_llm::Result<String> {
        let mut messages = self.seed_messages(system_prompt, history, message);

        let mut final_text = String::new();
        for round in 0..self.max_rounds {
            let response = self.provider.chat(&messages, &self.catalog).await?;
            if response.is_final() {
                final_text = response.message.content;
                break;
            }

            let tool_calls = response.message.tool_calls.clone();
            tracing::info!(round, tool_calls = tool_calls.len(), "model requested tools");
            messages.push(response.message);
            for call in &tool_calls {
                let result = match serde_json::from_str::<Value>(&call.arguments) {
                    Ok(args) => self.executor.execute(&call.name, &args, process_id).await,
                    Err(e) => json!({ "error": format!("invalid tool arguments: {e}") }),
                };
                messages.push(ChatMessage::tool_result(&call.id, result.to_string()));
            }
        }

        if final_text.is_empty() {
            tracing::warn!(max_rounds = self.max_rounds, "round budget exhausted");
            final_text = FALLBACK_RESPONSE.to_string();
        }

        self.spawn_chat_log(message, &final_text);
        Ok(final_text)
    }

    fn seed_messages(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Vec<ChatMessage> {
        let start = history.len().saturating_sub(self.max_history);
        let mut messages = Vec::with_capacity(history.len() - start + 2);
        messages.push(ChatMessage::system(system_prompt));
        for turn in &history[start..] {
            if turn.role == "assistant" {
                messages.push(ChatMessage::assistant(turn.content.clone()));
            } else {
                messages.push(ChatMessage::user(turn.content.clone()));
            }
        }
        messages.push(ChatMessage::user(message));
        messages
    }

    /// Detached persistence of the finished exchange. The answer has already
    /// been decided; a failed log write is logged and dropped.
    fn spawn_chat_log(&self, user_message: &str, response: &str) {
        let store = self.store.clone();
        let user_message = user_message.to_string();
        let response = response.to_string();
        tokio::spawn(async move {
            if let Err(e) = save_chat_log(store.as_ref(), &user_message, &response).await {
                tracing::warn!(error = %e, "chat log write failed");
            }
        });
    }
}

pub(crate) async fn save_chat_log(
    store: &dyn DocumentStore,
    user_message: &str,
    response: &str,
) -> pace_store::Result<()> {
    let ts = Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-");
    let log = format!("## Dashboard Chat — {ts}\n**User:** {user_message}\n**Pace:** {response}\n");
    store
        .upload(
            buckets::CHAT_LOGS,
            &format!("{CHAT_IDENTITY}/{ts}.md"),
            log.into_bytes(),
            UploadOptions::create_only("text/markdown"),
        )
        .await
}
