// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Selam relay bot.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Selam workspace. The chat transport and
//! completion provider plug in through traits defined here.

pub mod error;
pub mod traits;
pub mod types;

pub use error::SelamError;
pub use types::{
    AdapterType, ChatId, ChatKind, HealthStatus, IncomingMessage, MessageId, OutgoingMessage,
    ReplyContext, Sender, Update, UpdateId, UserId,
};

pub use traits::{ChatTransport, CompletionProvider, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_trait_modules_are_exported() {
        // If any trait module is missing or has a compile error, this test
        // won't compile.
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_chat_transport<T: ChatTransport>() {}
        fn _assert_completion_provider<T: CompletionProvider>() {}
    }

    #[test]
    fn update_without_message_is_representable() {
        let update = Update {
            id: UpdateId(1),
            chat_id: ChatId(42),
            chat_kind: ChatKind::Private,
            message: None,
        };
        assert!(update.message.is_none());
    }
}
