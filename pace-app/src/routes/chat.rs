use crate::context::ChatScope;
use crate::driver::ChatTurn;
use crate::server::AppState;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(default)]
    history: Vec<ChatTurn>,
    org_id: Option<String>,
    org_name: Option<String>,
    process_id: Option<String>,
    process_name: Option<String>,
}

pub fn router() -> axum::Router {
    axum::Router::new().route("/api/chat", post(post_chat))
}

#[tracing::instrument(level = "info", skip_all)]
async fn post_chat(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<Value>) {
    if req.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Message is required" })),
        );
    }

    let scope = ChatScope {
        org_id: req.org_id,
        org_name: req.org_name,
        process_id: req.process_id,
        process_name: req.process_name,
    };
    let system_prompt = state.context.system_prompt(&scope).await;

    match state
        .driver
        .run(
            &system_prompt,
            &req.history,
            &req.message,
            scope.process_id.as_deref(),
        )
        .await
    {
        Ok(response) => (StatusCode::OK, Json(json!({ "response": response }))),
        Err(e) => {
            tracing::error!(error = %e, "chat request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::test_support::{CannedProvider, state};
    use pace_store::MemoryStore;

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            history: vec![],
            org_id: None,
            org_name: None,
            process_id: None,
            process_name: None,
        }
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_running_the_loop() {
        let state = state(
            Arc::new(MemoryStore::new()),
            Arc::new(CannedProvider("unused".to_string())),
            None,
        );
        let (status, Json(body)) = post_chat(Extension(state), Json(request("  "))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message is required");
    }

    #[tokio::test]
    async fn chat_returns_the_final_answer() {
        let state = state(
            Arc::new(MemoryStore::new()),
            Arc::new(CannedProvider("Here is your summary.".to_string())),
            None,
        );
        let (status, Json(body)) =
            post_chat(Extension(state), Json(request("summarize the KB"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Here is your summary.");
    }
}
