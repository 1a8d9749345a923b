// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engagement policy: which messages get a reply.
//!
//! Private chats always engage. In groups the bot stays quiet unless it is
//! mentioned by handle, a configured trigger keyword appears, or the
//! message replies to one of the bot's own messages.

use selam_core::{ChatKind, IncomingMessage};

/// Decides whether a message warrants a reply.
#[derive(Debug, Clone)]
pub struct EngagePolicy {
    triggers: Vec<String>,
    bot_handle: String,
}

impl EngagePolicy {
    /// Builds a policy from trigger keywords and the bot's own handle
    /// (without the `@` prefix). Triggers match case-insensitively as
    /// substrings.
    pub fn new(triggers: Vec<String>, bot_handle: String) -> Self {
        Self {
            triggers: triggers.into_iter().map(|t| t.to_lowercase()).collect(),
            bot_handle: bot_handle.to_lowercase(),
        }
    }

    pub fn should_engage(&self, chat_kind: ChatKind, message: &IncomingMessage) -> bool {
        match chat_kind {
            ChatKind::Private => true,
            ChatKind::Group => {
                if message.reply_to.as_ref().is_some_and(|r| r.to_self) {
                    return true;
                }
                let lower = message.text.to_lowercase();
                if !self.bot_handle.is_empty() && lower.contains(&format!("@{}", self.bot_handle))
                {
                    return true;
                }
                self.triggers.iter().any(|t| lower.contains(t))
            }
        }
    }
}
