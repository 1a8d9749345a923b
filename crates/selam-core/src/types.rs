// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across adapter traits and the processing pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Opaque user identifier assigned by the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

/// Chat (conversation) identifier. Negative for group chats on Telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

/// Per-chat message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub i32);

/// Strictly increasing update identifier assigned by the transport upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UpdateId(pub i64);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AdapterType {
    Channel,
    Provider,
    Translator,
}

/// Whether a chat is a one-on-one conversation or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatKind {
    Private,
    Group,
}

/// The user who sent a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    /// First/display name shown in chat.
    pub display_name: String,
    /// Platform handle (username) without the `@` prefix, if set.
    pub handle: Option<String>,
}

/// Context about the message this one replies to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyContext {
    pub message_id: MessageId,
    pub sender: Sender,
    /// True when the replied-to message was sent by the bot itself.
    pub to_self: bool,
}

/// A text message carried inside an [`Update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub reply_to: Option<ReplyContext>,
}

/// One inbound event from the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub id: UpdateId,
    pub chat_id: ChatId,
    pub chat_kind: ChatKind,
    /// `None` for non-message updates (edits, joins, ...), which the
    /// processor ignores.
    pub message: Option<IncomingMessage>,
}

/// An outbound message to be delivered through the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub chat_id: ChatId,
    pub text: String,
    /// Deliver as a reply to this message when set.
    pub reply_to: Option<MessageId>,
}
