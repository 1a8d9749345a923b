// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-chat duplicate suppression.
//!
//! Long polling can redeliver updates after a crash or reconnect. Each chat
//! keeps a monotonic cursor of the highest update id already handled;
//! anything at or below the cursor is dropped. Cursors for chats other than
//! the one being processed never interact, so a busy group cannot mask
//! redeliveries in a quiet one.

use dashmap::DashMap;
use selam_core::{ChatId, UpdateId};
use tracing::debug;

/// Tracks the highest handled update id per chat.
pub struct DedupGate {
    cursors: DashMap<ChatId, UpdateId>,
    max_tracked: usize,
}

impl DedupGate {
    /// `max_tracked` bounds the number of chats with a retained cursor; the
    /// chat with the lowest cursor is evicted first.
    pub fn new(max_tracked: usize) -> Self {
        Self {
            cursors: DashMap::new(),
            max_tracked,
        }
    }

    /// Returns true when `id` has not been handled for `chat` yet.
    ///
    /// Does not move the cursor; call [`advance`](Self::advance) after the
    /// update has been dispatched.
    pub fn admit(&self, chat: ChatId, id: UpdateId) -> bool {
        match self.cursors.get(&chat) {
            Some(cursor) => id > *cursor,
            None => true,
        }
    }

    /// Moves the chat's cursor forward to `id` if it is ahead.
    pub fn advance(&self, chat: ChatId, id: UpdateId) {
        if !self.cursors.contains_key(&chat) && self.cursors.len() >= self.max_tracked {
            self.evict_lowest();
        }
        self.cursors
            .entry(chat)
            .and_modify(|cursor| {
                if id > *cursor {
                    *cursor = id;
                }
            })
            .or_insert(id);
    }

    fn evict_lowest(&self) {
        let lowest = self
            .cursors
            .iter()
            .min_by_key(|entry| *entry.value())
            .map(|entry| *entry.key());
        if let Some(chat) = lowest {
            debug!(chat_id = chat.0, "evicting dedup cursor for stale chat");
            self.cursors.remove(&chat);
        }
    }
}
