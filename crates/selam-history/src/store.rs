// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory per-user conversation history with char and age caps.
//!
//! Each user owns an independent ordered buffer of raw message texts.
//! Both caps evict oldest-first: entries older than the sliding window are
//! dropped, then entries are dropped until the total character count fits
//! under the cap. Eviction runs on every write and every read, so a reader
//! never observes stale or over-cap state.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use selam_core::UserId;
use tracing::debug;

use crate::clock::Clock;

/// Retention limits for [`HistoryStore`].
#[derive(Debug, Clone, Copy)]
pub struct HistoryLimits {
    /// Maximum total characters retained per user.
    pub max_chars: usize,
    /// Sliding window; entries older than this are evicted.
    pub max_age: Duration,
    /// Maximum number of users tracked before the least recently active
    /// user's history is evicted.
    pub max_users: usize,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            max_chars: 1000,
            max_age: Duration::from_secs(3600),
            max_users: 10_000,
        }
    }
}

#[derive(Debug)]
struct Entry {
    text: String,
    chars: usize,
    at: Duration,
}

#[derive(Debug)]
struct UserHistory {
    entries: VecDeque<Entry>,
    total_chars: usize,
    last_active: Duration,
}

impl UserHistory {
    fn new(now: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            total_chars: 0,
            last_active: now,
        }
    }

    fn prune(&mut self, now: Duration, limits: &HistoryLimits) {
        while let Some(front) = self.entries.front() {
            if now.saturating_sub(front.at) >= limits.max_age {
                self.total_chars -= front.chars;
                self.entries.pop_front();
            } else {
                break;
            }
        }
        while self.total_chars > limits.max_chars {
            if let Some(evicted) = self.entries.pop_front() {
                self.total_chars -= evicted.chars;
            } else {
                break;
            }
        }
    }

    fn joined(&self) -> String {
        let mut out = String::with_capacity(self.total_chars + self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&entry.text);
        }
        out
    }
}

/// Concurrent per-user conversation history.
///
/// All operations are keyed by [`UserId`], so the same user shares one
/// history across every chat they appear in.
pub struct HistoryStore {
    users: DashMap<UserId, UserHistory>,
    limits: HistoryLimits,
    clock: Arc<dyn Clock>,
}

impl HistoryStore {
    pub fn new(limits: HistoryLimits, clock: Arc<dyn Clock>) -> Self {
        Self {
            users: DashMap::new(),
            limits,
            clock,
        }
    }

    /// Records a raw message text for `user`, then enforces both caps.
    pub fn add_message(&self, user: UserId, text: &str) {
        let now = self.clock.now();
        if !self.users.contains_key(&user) && self.users.len() >= self.limits.max_users {
            self.evict_least_recent();
        }

        let mut history = self
            .users
            .entry(user)
            .or_insert_with(|| UserHistory::new(now));
        let chars = text.chars().count();
        history.entries.push_back(Entry {
            text: text.to_string(),
            chars,
            at: now,
        });
        history.total_chars += chars;
        history.last_active = now;
        history.prune(now, &self.limits);
    }

    /// Returns the user's retained messages oldest-first, space-joined.
    /// Unknown users get an empty string.
    pub fn get_history(&self, user: UserId) -> String {
        let now = self.clock.now();
        match self.users.get_mut(&user) {
            Some(mut history) => {
                history.prune(now, &self.limits);
                history.joined()
            }
            None => String::new(),
        }
    }

    /// Number of users currently tracked.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    fn evict_least_recent(&self) {
        let oldest = self
            .users
            .iter()
            .min_by_key(|entry| entry.value().last_active)
            .map(|entry| *entry.key());
        if let Some(user) = oldest {
            debug!(user_id = user.0, "evicting least recently active user history");
            self.users.remove(&user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Test clock advanced manually in whole seconds.
    struct ManualClock(AtomicU64);

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self(AtomicU64::new(1_000_000)))
        }

        fn advance_secs(&self, secs: u64) {
            self.0.fetch_add(secs, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            Duration::from_secs(self.0.load(Ordering::SeqCst))
        }
    }

    fn store_with(limits: HistoryLimits) -> (HistoryStore, Arc<ManualClock>) {
        let clock = ManualClock::new();
        (HistoryStore::new(limits, clock.clone()), clock)
    }

    const USER: UserId = UserId(42);

    #[test]
    fn unknown_user_returns_empty_string() {
        let (store, _) = store_with(HistoryLimits::default());
        assert_eq!(store.get_history(USER), "");
    }

    #[test]
    fn messages_join_with_spaces_oldest_first() {
        let (store, _) = store_with(HistoryLimits::default());
        store.add_message(USER, "hello");
        store.add_message(USER, "how are you");
        store.add_message(USER, "fine");
        assert_eq!(store.get_history(USER), "hello how are you fine");
    }

    #[test]
    fn users_have_independent_histories() {
        let (store, _) = store_with(HistoryLimits::default());
        store.add_message(UserId(1), "one");
        store.add_message(UserId(2), "two");
        assert_eq!(store.get_history(UserId(1)), "one");
        assert_eq!(store.get_history(UserId(2)), "two");
    }

    #[test]
    fn char_cap_evicts_oldest_first() {
        let limits = HistoryLimits {
            max_chars: 10,
            ..Default::default()
        };
        let (store, _) = store_with(limits);
        store.add_message(USER, "aaaa");
        store.add_message(USER, "bbbb");
        store.add_message(USER, "cccc");
        assert_eq!(store.get_history(USER), "bbbb cccc");
    }

    #[test]
    fn char_cap_holds_after_every_write() {
        let limits = HistoryLimits {
            max_chars: 20,
            ..Default::default()
        };
        let (store, _) = store_with(limits);
        for i in 0..50 {
            store.add_message(USER, &format!("message-{i}"));
            let total: usize = store
                .get_history(USER)
                .split(' ')
                .map(|m| m.chars().count())
                .sum();
            assert!(total <= 20, "retained {total} chars after write {i}");
        }
    }

    #[test]
    fn char_cap_counts_chars_not_bytes() {
        let limits = HistoryLimits {
            max_chars: 4,
            ..Default::default()
        };
        let (store, _) = store_with(limits);
        // Four Ethiopic chars is twelve UTF-8 bytes but fits the cap.
        store.add_message(USER, "\u{1230}\u{120B}\u{121D}\u{1362}");
        assert_eq!(store.get_history(USER), "\u{1230}\u{120B}\u{121D}\u{1362}");
    }

    #[test]
    fn entries_older_than_window_are_evicted_on_write() {
        let (store, clock) = store_with(HistoryLimits::default());
        store.add_message(USER, "stale");
        clock.advance_secs(3601);
        store.add_message(USER, "fresh");
        assert_eq!(store.get_history(USER), "fresh");
    }

    #[test]
    fn entries_older_than_window_are_evicted_on_read() {
        let (store, clock) = store_with(HistoryLimits::default());
        store.add_message(USER, "stale");
        clock.advance_secs(3600);
        assert_eq!(store.get_history(USER), "");
    }

    #[test]
    fn entry_just_inside_window_is_retained() {
        let (store, clock) = store_with(HistoryLimits::default());
        store.add_message(USER, "recent");
        clock.advance_secs(3599);
        assert_eq!(store.get_history(USER), "recent");
    }

    #[test]
    fn oversized_single_message_leaves_history_empty() {
        let limits = HistoryLimits {
            max_chars: 5,
            ..Default::default()
        };
        let (store, _) = store_with(limits);
        store.add_message(USER, "much too long for the cap");
        assert_eq!(store.get_history(USER), "");
    }

    #[test]
    fn least_recently_active_user_is_evicted_at_capacity() {
        let limits = HistoryLimits {
            max_users: 2,
            ..Default::default()
        };
        let (store, clock) = store_with(limits);
        store.add_message(UserId(1), "first");
        clock.advance_secs(1);
        store.add_message(UserId(2), "second");
        clock.advance_secs(1);
        store.add_message(UserId(3), "third");

        assert_eq!(store.user_count(), 2);
        assert_eq!(store.get_history(UserId(1)), "");
        assert_eq!(store.get_history(UserId(2)), "second");
        assert_eq!(store.get_history(UserId(3)), "third");
    }

    #[test]
    fn writing_to_existing_user_does_not_evict_at_capacity() {
        let limits = HistoryLimits {
            max_users: 2,
            ..Default::default()
        };
        let (store, clock) = store_with(limits);
        store.add_message(UserId(1), "first");
        clock.advance_secs(1);
        store.add_message(UserId(2), "second");
        clock.advance_secs(1);
        store.add_message(UserId(1), "again");

        assert_eq!(store.user_count(), 2);
        assert_eq!(store.get_history(UserId(1)), "first again");
    }
}
