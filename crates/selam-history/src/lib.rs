// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded per-user conversation history.
//!
//! Keeps a short rolling window of each user's recent messages so the
//! completion prompt can carry conversational context. Retention is bounded
//! three ways: total characters per user, entry age, and number of tracked
//! users.

pub mod clock;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use store::{HistoryLimits, HistoryStore};
