//! Dashboard chat server.
//!
//! Wires the Supabase-backed store, the PostgREST reads, and the LLM client
//! into the route tree. All shared state is read-only after startup; one
//! request drives one conversation loop.

use crate::config::DashboardConfig;
use crate::context::ContextAssembler;
use crate::driver::ConversationDriver;
use crate::presign::RecordingSigner;
use crate::routes;
use anyhow::Result;
use axum::Extension;
use axum::http::HeaderMap;
use axum::http::Request;
use axum::http::StatusCode;
use axum::response::Response;
use pace_data::{DashboardDb, PostgrestDb};
use pace_llm::{ChatProvider, LlmClient};
use pace_store::{DocumentStore, SupabaseStore};
use pace_tools::ToolExecutor;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub context: ContextAssembler,
    pub driver: ConversationDriver,
    pub signer: Option<RecordingSigner>,
}

pub async fn doctor(config_path: Option<PathBuf>) -> Result<()> {
    let cfg = DashboardConfig::load(config_path).await?;
    tracing::info!(
        model = %cfg.chat.model,
        chat_max_rounds = cfg.chat.max_rounds,
        supabase_url = %cfg.supabase.url,
        bind_addr = %cfg.server.bind_addr,
        recordings_bucket = %cfg.recordings.bucket,
        recordings_configured = cfg.recordings.access_key_id.is_some(),
        "config ok"
    );
    Ok(())
}

pub async fn serve(config_path: Option<PathBuf>) -> Result<()> {
    let cfg = DashboardConfig::load(config_path).await?;
    let addr: SocketAddr = cfg
        .server
        .bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("parse server.bind_addr {:?}: {e}", cfg.server.bind_addr))?;
    tracing::info!(
        bind_addr = %addr,
        model = %cfg.chat.model,
        chat_max_rounds = cfg.chat.max_rounds,
        chat_max_history = cfg.chat.max_history,
        http_timeout_seconds = cfg.server.http_timeout_seconds,
        http_max_in_flight = cfg.server.http_max_in_flight,
        recordings_configured = cfg.recordings.access_key_id.is_some(),
        "server configuration loaded"
    );
    let listener = preflight_bind_listener(addr).await?;

    let api_key = cfg
        .api_key_for_model()
        .ok_or_else(|| anyhow::anyhow!("no API key configured for model {:?}", cfg.chat.model))?;
    let store: Arc<dyn DocumentStore> = Arc::new(SupabaseStore::new(
        &cfg.supabase.url,
        &cfg.supabase.service_role_key,
    ));
    let db: Arc<dyn DashboardDb> = Arc::new(PostgrestDb::new(
        &cfg.supabase.url,
        &cfg.supabase.service_role_key,
    ));
    let provider: Arc<dyn ChatProvider> = Arc::new(LlmClient::new(&api_key, &cfg.chat.model));

    let signer = match (&cfg.recordings.access_key_id, &cfg.recordings.secret_access_key) {
        (Some(access_key_id), Some(secret_access_key)) => Some(RecordingSigner::new(
            access_key_id,
            secret_access_key,
            &cfg.recordings.region,
            &cfg.recordings.bucket,
        )),
        _ => {
            tracing::warn!("recording presigner disabled; AWS credentials not configured");
            None
        }
    };

    let state = Arc::new(AppState {
        store: store.clone(),
        context: ContextAssembler::new(store.clone(), db),
        driver: ConversationDriver::new(
            provider,
            ToolExecutor::new(store.clone()),
            store,
            cfg.chat.max_rounds,
            cfg.chat.max_history,
        ),
        signer,
    });

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id_from_headers(request.headers())
            )
        })
        .on_response(
            |response: &Response, latency: Duration, _span: &tracing::Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis() as u64,
                    "http request completed"
                );
            },
        )
        .on_failure(
            |error: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span| {
                tracing::error!(
                    error_class = %error,
                    latency_ms = latency.as_millis() as u64,
                    "http request failed"
                );
            },
        );

    let app = routes::router()
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(GlobalConcurrencyLimitLayer::new(
            cfg.server.http_max_in_flight,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(cfg.server.http_timeout_seconds),
        ))
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    tracing::info!(%addr, "pacedash serving");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("http server shutdown completed");
    Ok(())
}

async fn preflight_bind_listener(addr: SocketAddr) -> Result<tokio::net::TcpListener> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("preflight bind failed for {addr}: {e}"))?;
    tracing::info!(%addr, "preflight bind check passed");
    Ok(listener)
}

fn request_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "missing".to_string())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(sig) => sig,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler; falling back to ctrl_c only");
                if let Err(ctrlc_err) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %ctrlc_err, "failed to await ctrl-c signal");
                }
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("received ctrl-c; beginning graceful shutdown");
            }
            _ = terminate.recv() => {
                tracing::warn!("received SIGTERM; beginning graceful shutdown");
            }
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to await ctrl-c signal");
        } else {
            tracing::warn!("received ctrl-c; beginning graceful shutdown");
        }
    }
}
