// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for remote language-model APIs.

use async_trait::async_trait;

use crate::traits::adapter::PluginAdapter;

/// Adapter for a remote completion API.
///
/// The contract is deliberately infallible: implementations absorb every
/// failure into a configured fallback string so callers building a
/// user-facing reply never observe a raw error. Health is reported
/// separately through [`PluginAdapter::health_check`].
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Returns the model's reply to `prompt`, or the fallback message when
    /// all attempts fail.
    async fn get_response(&self, prompt: &str) -> String;
}
