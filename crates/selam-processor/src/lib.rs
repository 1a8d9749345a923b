// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message processing pipeline and dispatch loop.
//!
//! Ties the adapters together: updates come in from the chat transport,
//! pass the engagement and dedup gates, flow through the language bridge
//! and completion provider, and go back out as replies in the sender's
//! language. The dispatcher fans updates out to concurrent workers while
//! keeping each user's updates in order.

pub mod dedup;
pub mod dispatch;
pub mod engage;
pub mod pipeline;
pub mod prompt;
pub mod shutdown;

pub use dedup::DedupGate;
pub use dispatch::Dispatcher;
pub use engage::EngagePolicy;
pub use pipeline::MessageProcessor;
pub use shutdown::install_signal_handler;
