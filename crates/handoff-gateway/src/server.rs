// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use handoff_core::{HandoffError, SettingsStore};
use handoff_engine::Engine;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Per-invocation settings source.
    pub settings: Arc<dyn SettingsStore>,
    /// The decision pipeline.
    pub engine: Arc<Engine>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

impl GatewayState {
    pub fn new(settings: Arc<dyn SettingsStore>, engine: Arc<Engine>) -> Self {
        Self {
            settings,
            engine,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Gateway server configuration (mirrors GatewayConfig from handoff-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the gateway router. Split out so tests can drive it with
/// `tower::ServiceExt::oneshot` without binding a socket.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/webhook", post(handlers::post_webhook))
        .route("/health", get(handlers::get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the webhook HTTP server.
///
/// Serves `POST /webhook` (signed platform events) and `GET /health`
/// (unauthenticated liveness).
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), HandoffError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HandoffError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| HandoffError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
