// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat transport trait for messaging platform integrations.

use async_trait::async_trait;

use crate::error::SelamError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{MessageId, OutgoingMessage, Update};

/// Adapter for a bidirectional messaging transport (Telegram, test harness).
///
/// Transports deliver platform updates as channel-agnostic [`Update`]s and
/// accept [`OutgoingMessage`]s for delivery.
#[async_trait]
pub trait ChatTransport: PluginAdapter {
    /// Receives the next inbound update from the platform.
    ///
    /// Errors when the underlying stream is closed.
    async fn recv_update(&self) -> Result<Update, SelamError>;

    /// Sends a message, returning the platform-assigned message id.
    async fn send_message(&self, msg: OutgoingMessage) -> Result<MessageId, SelamError>;

    /// The bot's own handle (username) without the `@` prefix.
    ///
    /// Used for mention detection in group chats. Empty until connected.
    fn bot_handle(&self) -> &str;
}
