//! HTTP server for debrief
//!
//! Exposes health, docs and meeting analysis endpoints under `/api`.

pub mod error;
mod handlers;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis::AnalysisPipeline;
use crate::config::Settings;
use crate::llm::LlmProvider;

/// Shared, read-only state for every request
#[derive(Clone)]
pub struct AppState {
    pub pipeline: AnalysisPipeline,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(pipeline: AnalysisPipeline, request_timeout: Duration) -> Self {
        Self {
            pipeline,
            request_timeout,
        }
    }

    pub fn from_settings(settings: &Settings, provider: Arc<dyn LlmProvider>) -> Self {
        Self::new(AnalysisPipeline::new(provider), settings.request_timeout())
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/docs", get(handlers::api_docs))
        .route("/api/analyze-meeting", post(handlers::analyze_meeting))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until Ctrl-C or SIGTERM.
pub async fn serve(settings: &Settings, provider: Arc<dyn LlmProvider>) -> Result<()> {
    let addr = settings.listen_addr()?;
    let app = router(AppState::from_settings(settings, provider));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Meeting analysis API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
