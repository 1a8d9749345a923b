// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the health surface.
//!
//! Everything here is unauthenticated and read-only; the surface exists
//! for uptime monitors and container orchestrators, not end users.

use axum::{Json, extract::State};
use selam_core::HealthStatus;
use serde::Serialize;

use crate::server::GatewayState;

/// Response body for `GET /`.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: String,
    pub bot: String,
    pub version: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: `healthy` when the completion provider answers,
    /// `degraded` otherwise.
    pub status: String,
    /// Provider probe detail.
    pub provider: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Response body for `GET /status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub bot: String,
    pub uptime_secs: u64,
}

/// GET /
///
/// Liveness: answers as soon as the process is up.
pub async fn get_root(State(state): State<GatewayState>) -> Json<RootResponse> {
    Json(RootResponse {
        status: "alive".to_string(),
        bot: state.agent_name.clone(),
        version: state.version.clone(),
    })
}

/// GET /ping
///
/// Minimal keep-alive target. HEAD is served automatically for GET routes.
pub async fn get_ping() -> &'static str {
    "PONG"
}

/// GET /health
///
/// Readiness: probes the completion provider with a single request and
/// reports the result. Always 200; monitors read the status field.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let (status, provider) = match state.provider.health_check().await {
        Ok(HealthStatus::Healthy) => ("healthy".to_string(), "ok".to_string()),
        Ok(HealthStatus::Degraded(detail)) => ("degraded".to_string(), detail),
        Ok(HealthStatus::Unhealthy(detail)) => ("unhealthy".to_string(), detail),
        Err(err) => ("unhealthy".to_string(), err.to_string()),
    };

    Json(HealthResponse {
        status,
        provider,
        version: state.version.clone(),
        uptime_secs: state.started.elapsed().as_secs(),
    })
}

/// GET /status
pub async fn get_status(State(state): State<GatewayState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running".to_string(),
        bot: state.agent_name.clone(),
        uptime_secs: state.started.elapsed().as_secs(),
    })
}

/// GET /metrics
///
/// Prometheus-style plain text exposition with the one gauge uptime
/// monitors care about.
pub async fn get_metrics(State(state): State<GatewayState>) -> String {
    format!(
        "# TYPE selam_uptime_seconds gauge\nselam_uptime_seconds {}\n",
        state.started.elapsed().as_secs()
    )
}
