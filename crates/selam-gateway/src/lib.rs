// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health and status HTTP endpoints.
//!
//! A small unauthenticated axum surface for uptime monitors and container
//! orchestrators: liveness at `/`, readiness at `/health` (probes the
//! completion provider), `/ping` for keep-alive pollers, plus `/status`
//! and `/metrics`.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, router, start_server};
