// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat transport for deterministic testing.
//!
//! `MockTransport` implements `ChatTransport` with injectable inbound
//! updates and captured outbound messages for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use selam_core::{
    AdapterType, ChatTransport, HealthStatus, MessageId, OutgoingMessage, PluginAdapter,
    SelamError, Update,
};

/// A mock chat transport for testing.
///
/// Provides two queues:
/// - **inbound**: updates injected via `inject_update()` are returned by `recv_update()`
/// - **sent**: messages passed to `send_message()` are captured and retrievable via `sent_messages()`
pub struct MockTransport {
    inbound: Arc<Mutex<VecDeque<Update>>>,
    sent: Arc<Mutex<Vec<OutgoingMessage>>>,
    notify: Arc<Notify>,
    next_message_id: AtomicI32,
    handle: String,
}

impl MockTransport {
    /// Create a new mock transport with empty queues and the handle
    /// `selam_bot`.
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
            next_message_id: AtomicI32::new(100),
            handle: "selam_bot".to_string(),
        }
    }

    /// Create a mock transport pre-loaded with updates to deliver in order.
    pub fn with_updates(updates: Vec<Update>) -> Self {
        let transport = Self::new();
        {
            let inbound = transport.inbound.clone();
            let mut queue = inbound.try_lock().expect("fresh transport is uncontended");
            queue.extend(updates);
        }
        transport
    }

    /// Inject an inbound update into the receive queue.
    pub async fn inject_update(&self, update: Update) {
        self.inbound.lock().await.push_back(update);
        self.notify.notify_one();
    }

    /// Get all messages that were sent through `send_message()`.
    pub async fn sent_messages(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().await.clone()
    }

    /// Get the count of sent messages.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockTransport {
    fn name(&self) -> &str {
        "mock-transport"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, SelamError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SelamError> {
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn recv_update(&self) -> Result<Update, SelamError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(update) = queue.pop_front() {
                    return Ok(update);
                }
            }
            // Wait until a new update is injected.
            self.notify.notified().await;
        }
    }

    async fn send_message(&self, msg: OutgoingMessage) -> Result<MessageId, SelamError> {
        self.sent.lock().await.push(msg);
        Ok(MessageId(self.next_message_id.fetch_add(1, Ordering::SeqCst)))
    }

    fn bot_handle(&self) -> &str {
        &self.handle
    }
}
