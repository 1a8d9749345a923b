// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion from Telegram messages to transport-agnostic updates.
//!
//! Maps teloxide's [`Message`] into the core [`Update`] shape the
//! processor consumes, and answers the two built-in commands directly so
//! they never reach the reply pipeline.

use selam_core::{
    ChatId, ChatKind, IncomingMessage, MessageId, ReplyContext, Sender, Update, UpdateId, UserId,
};
use teloxide::types::{Message, User};

/// Reply for the `/start` command.
pub const START_TEXT: &str = "Selam! \u{1F44B} I am Selam, your chat companion. Talk to me in \
Amharic, English, or Afan Oromo, in whichever script you like, and I will answer in kind. \
In groups, mention me or say one of my trigger words.";

/// Reply for the `/help` command.
pub const HELP_TEXT: &str = "Here is how I work:\n\
- Write to me directly and I always answer.\n\
- In groups I answer when mentioned, when you reply to me, or when a trigger word appears.\n\
- I understand Ge'ez script, romanized Amharic, Afan Oromo, and English.\n\
- I remember the last hour of our chat to keep context.";

/// Returns the canned reply when `text` is a built-in command, handling
/// the `/command@botname` form Telegram uses in groups.
pub fn command_reply(text: &str) -> Option<&'static str> {
    let first = text.trim().split_whitespace().next()?;
    let command = first.split('@').next()?;
    match command {
        "/start" => Some(START_TEXT),
        "/help" => Some(HELP_TEXT),
        _ => None,
    }
}

/// Maps the Telegram chat type onto the processor's two-way split.
/// Channels return `None`; the bot does not post to broadcast channels.
pub fn classify_chat(msg: &Message) -> Option<ChatKind> {
    if msg.chat.is_private() {
        Some(ChatKind::Private)
    } else if msg.chat.is_group() || msg.chat.is_supergroup() {
        Some(ChatKind::Group)
    } else {
        None
    }
}

fn to_sender(user: &User) -> Sender {
    Sender {
        id: UserId(user.id.0 as i64),
        display_name: user.first_name.clone(),
        handle: user.username.clone(),
    }
}

/// Converts a Telegram text message into a core [`Update`].
///
/// Returns `None` for channel posts, messages without a sender, and
/// non-text payloads (stickers, photos, joins). `bot_id` identifies
/// replies aimed at the bot itself.
pub fn to_core_update(update_id: i64, msg: &Message, bot_id: Option<u64>) -> Option<Update> {
    let chat_kind = classify_chat(msg)?;
    let user = msg.from.as_ref()?;
    let text = msg.text()?;

    let reply_to = msg.reply_to_message().and_then(|replied| {
        let replied_user = replied.from.as_ref()?;
        Some(ReplyContext {
            message_id: MessageId(replied.id.0),
            sender: to_sender(replied_user),
            to_self: bot_id.is_some_and(|id| replied_user.id.0 == id),
        })
    });

    Some(Update {
        id: UpdateId(update_id),
        chat_id: ChatId(msg.chat.id.0),
        chat_kind,
        message: Some(IncomingMessage {
            id: MessageId(msg.id.0),
            sender: to_sender(user),
            text: text.to_string(),
            reply_to,
        }),
    })
}
