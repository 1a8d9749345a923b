// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health HTTP server built on axum.

use std::sync::Arc;
use std::time::Instant;

use axum::{Router, routing::get};
use selam_core::{CompletionProvider, SelamError};
use tower_http::cors::CorsLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Probed by `GET /health`.
    pub provider: Arc<dyn CompletionProvider>,
    /// Process start time for uptime calculation.
    pub started: Instant,
    /// Bot display name from config.
    pub agent_name: String,
    /// Binary version.
    pub version: String,
}

/// Gateway server configuration (mirrors GatewayConfig from selam-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the health surface router.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::get_root))
        .route("/ping", get(handlers::get_ping))
        .route("/health", get(handlers::get_health))
        .route("/status", get(handlers::get_status))
        .route("/metrics", get(handlers::get_metrics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the health HTTP server.
///
/// Binds to the configured host:port and serves until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), SelamError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| SelamError::Transport {
                message: format!("failed to bind gateway to {addr}: {e}"),
                source: Some(Box::new(e)),
            })?;

    tracing::info!("health server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| SelamError::Transport {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
