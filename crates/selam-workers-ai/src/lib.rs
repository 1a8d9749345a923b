// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cloudflare Workers AI completion provider.
//!
//! Implements [`selam_core::CompletionProvider`] over the Workers AI chat
//! completion endpoint (`POST {base_url}{model}`), with bounded exponential
//! backoff for transient failures and a configured fallback message so the
//! caller-facing surface never errors.

pub mod client;
pub mod types;

pub use client::{ClientConfig, CompletionClient};
pub use types::{ApiErrorKind, ApiOutcome, ChatMessage, CompletionRequest};

/// Default persona instruction sent as the system message.
///
/// Replies flow through a machine-translation round trip before reaching
/// the user, so the instruction forbids slang, abbreviations, and emoji-only
/// answers that translate poorly.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are Selam, a warm and playful friend \
chatting in a group of close friends. Reply in one short sentence, two at most. \
Use simple everyday words and full spellings, never slang, abbreviations, or \
internet shorthand, because your reply may be machine translated. Be kind, a \
little witty, and direct. Never talk about being a program or an assistant; \
you are simply Selam.";
