// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt composition for the completion provider.
//!
//! The prompt carries the sender's translated history and the tagged new
//! message. Sender identity is embedded in the message text itself so the
//! model can tell group members apart without any structured user field.

use selam_core::Sender;

fn handle_of(sender: &Sender) -> &str {
    sender.handle.as_deref().unwrap_or("none")
}

/// Tags `text` with the sender's identity, and with the replied-to user
/// when the message answers someone else.
pub fn tag_message(sender: &Sender, text: &str, reply_to: Option<&Sender>) -> String {
    let mut tagged = format!(
        "User {} (@{}, ID: {}): {}",
        sender.display_name,
        handle_of(sender),
        sender.id.0,
        text
    );
    if let Some(replied) = reply_to {
        tagged.push_str(&format!(
            " (Reply from {} (@{}, ID: {}))",
            replied.display_name,
            handle_of(replied),
            replied.id.0
        ));
    }
    tagged
}

/// Builds the full prompt from translated history and the tagged message.
pub fn compose(history: &str, tagged_message: &str) -> String {
    format!("Our Last Chat(used for to remember): {history}\n\nMy new Message: {tagged_message}")
}
