// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Selam integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - completion provider with pre-configured replies
//! - [`MockTransport`] - chat transport with update injection and send capture
//! - [`MockTranslator`] - scripted translator for bridge tests

pub mod mock_provider;
pub mod mock_translator;
pub mod mock_transport;

pub use mock_provider::MockProvider;
pub use mock_translator::MockTranslator;
pub use mock_transport::MockTransport;

use selam_core::{
    ChatId, ChatKind, IncomingMessage, MessageId, ReplyContext, Sender, Update, UpdateId, UserId,
};

/// Builds a plain private-chat text update for tests.
pub fn private_text_update(update_id: i64, user_id: i64, text: &str) -> Update {
    Update {
        id: UpdateId(update_id),
        chat_id: ChatId(user_id),
        chat_kind: ChatKind::Private,
        message: Some(IncomingMessage {
            id: MessageId(update_id as i32),
            sender: test_sender(user_id),
            text: text.to_string(),
            reply_to: None,
        }),
    }
}

/// Builds a group-chat text update for tests.
pub fn group_text_update(update_id: i64, chat_id: i64, user_id: i64, text: &str) -> Update {
    Update {
        id: UpdateId(update_id),
        chat_id: ChatId(chat_id),
        chat_kind: ChatKind::Group,
        message: Some(IncomingMessage {
            id: MessageId(update_id as i32),
            sender: test_sender(user_id),
            text: text.to_string(),
            reply_to: None,
        }),
    }
}

/// Builds a group-chat update replying to one of the bot's own messages.
pub fn group_reply_to_bot_update(update_id: i64, chat_id: i64, user_id: i64, text: &str) -> Update {
    let mut update = group_text_update(update_id, chat_id, user_id, text);
    if let Some(message) = update.message.as_mut() {
        message.reply_to = Some(ReplyContext {
            message_id: MessageId(1),
            sender: Sender {
                id: UserId(999_000),
                display_name: "Selam".to_string(),
                handle: Some("selam_bot".to_string()),
            },
            to_self: true,
        });
    }
    update
}

fn test_sender(user_id: i64) -> Sender {
    Sender {
        id: UserId(user_id),
        display_name: format!("User{user_id}"),
        handle: Some(format!("user{user_id}")),
    }
}
