use crate::presign::URL_EXPIRY_SECONDS;
use crate::server::AppState;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct RecordingQuery {
    key: Option<String>,
}

pub fn router() -> axum::Router {
    axum::Router::new().route("/api/recording-url", get(get_recording_url))
}

#[tracing::instrument(level = "debug", skip_all)]
async fn get_recording_url(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<RecordingQuery>,
) -> (StatusCode, Json<Value>) {
    let Some(key) = query.key.filter(|k| !k.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing 'key' query parameter" })),
        );
    };
    if !key.ends_with(".mp4") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid key format" })),
        );
    }
    let Some(signer) = state.signer.as_ref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "AWS credentials not configured" })),
        );
    };

    match signer.presign_get(&key, Utc::now(), URL_EXPIRY_SECONDS) {
        Ok(url) => (
            StatusCode::OK,
            Json(json!({ "url": url, "expires_in": URL_EXPIRY_SECONDS })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "recording presign failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to generate video URL", "detail": e.to_string() })),
            )
        }
    }
}
