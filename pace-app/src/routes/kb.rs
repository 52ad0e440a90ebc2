//! Direct knowledge-base endpoints used by the dashboard KB editor. Unlike
//! the chat tools these do not write audit entries; only model-initiated
//! mutations are audited.

use crate::server::AppState;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json};
use pace_tools::{DEFAULT_PROCESS_ID, kb};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KbQuery {
    process_id: Option<String>,
}

impl KbQuery {
    fn process_id(&self) -> &str {
        self.process_id
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_PROCESS_ID)
    }
}

#[derive(Debug, Deserialize)]
struct KbWrite {
    #[serde(default)]
    content: String,
    section: Option<String>,
}

pub fn router() -> axum::Router {
    axum::Router::new().route("/api/kb", get(read_kb).put(replace_kb).post(append_kb))
}

#[tracing::instrument(level = "debug", skip_all)]
async fn read_kb(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<KbQuery>,
) -> (StatusCode, Json<Value>) {
    let process_id = query.process_id();
    match kb::read(state.store.as_ref(), process_id).await {
        Ok(content) => (
            StatusCode::OK,
            Json(json!({ "processId": process_id, "content": content })),
        ),
        Err(e) if e.is_not_found() => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "KB not found", "detail": e.to_string() })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "kb read failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

#[tracing::instrument(level = "info", skip_all)]
async fn replace_kb(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<KbQuery>,
    Json(body): Json<KbWrite>,
) -> (StatusCode, Json<Value>) {
    if body.content.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "content is required" })),
        );
    }
    let process_id = query.process_id();
    match kb::replace(state.store.as_ref(), process_id, &body.content).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "action": "replaced", "processId": process_id })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "kb replace failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

#[tracing::instrument(level = "info", skip_all)]
async fn append_kb(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<KbQuery>,
    Json(body): Json<KbWrite>,
) -> (StatusCode, Json<Value>) {
    if body.content.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "content is required" })),
        );
    }
    let process_id = query.process_id();
    match kb::append(
        state.store.as_ref(),
        process_id,
        &body.content,
        body.section.as_deref(),
    )
    .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "action": "appended", "processId": process_id })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "kb append failed");
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

    fn test_state() -> (Arc<MemoryStore>, Arc<AppState>) {
        let store = Arc::new(MemoryStore::new());
        let state = state(
            store.clone(),
            Arc::new(CannedProvider("unused".to_string())),
            None,
        );
        (store, state)
    }

    fn query(process_id: Option<&str>) -> Query<KbQuery> {
        Query(KbQuery {
            process_id: process_id.map(|p| p.to_string()),
        })
    }

    #[tokio::test]
    async fn read_missing_kb_is_404() {
        let (_, state) = test_state();
        let (status, Json(body)) = read_kb(Extension(state), query(Some("p1"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "KB not found");
    }

    #[tokio::test]
    async fn replace_then_read_round_trips() {
        let (_, state) = test_state();
        let (status, Json(body)) = replace_kb(
            Extension(state.clone()),
            query(Some("p1")),
            Json(KbWrite {
                content: "# Rules".to_string(),
                section: None,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["action"], "replaced");
        assert_eq!(body["processId"], "p1");

        let (status, Json(body)) = read_kb(Extension(state), query(Some("p1"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "# Rules");
    }

    #[tokio::test]
    async fn append_adds_a_section_heading() {
        let (_, state) = test_state();
        replace_kb(
            Extension(state.clone()),
            query(Some("p1")),
            Json(KbWrite {
                content: "base".to_string(),
                section: None,
            }),
        )
        .await;
        let (status, Json(body)) = append_kb(
            Extension(state.clone()),
            query(Some("p1")),
            Json(KbWrite {
                content: "more".to_string(),
                section: Some("Notes".to_string()),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["action"], "appended");

        let (_, Json(body)) = read_kb(Extension(state), query(Some("p1"))).await;
        assert_eq!(body["content"], "base\n\n## Notes\n\nmore");
    }

    #[tokio::test]
    async fn missing_content_is_400() {
        let (_, state) = test_state();
        let (status, Json(body)) = replace_kb(
            Extension(state),
            query(None),
            Json(KbWrite {
                content: String::new(),
                section: None,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "content is required");
    }

    #[tokio::test]
    async fn process_id_defaults_when_absent() {
        let (store, state) = test_state();
        replace_kb(
            Extension(state),
            query(None),
            Json(KbWrite {
                content: "default kb".to_string(),
                section: None,
            }),
        )
        .await;
        let content = kb::read(store.as_ref() as &dyn pace_store::DocumentStore, DEFAULT_PROCESS_ID)
            .await
            .unwrap();
        assert_eq!(content, "default kb");
    }
}
