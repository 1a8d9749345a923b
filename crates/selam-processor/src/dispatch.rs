// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dispatch loop: receives updates and fans them out to worker tasks.
//!
//! Updates from different users are processed concurrently; updates from
//! the same user run strictly in arrival order. Ordering is decided in the
//! dispatch loop itself, before any worker task is scheduled: each update
//! is chained onto the completion of the previous update from the same
//! user, so scheduler interleaving cannot reorder them. In-flight replies
//! are drained on shutdown.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use selam_core::{ChatTransport, UserId};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{error, info};

use crate::pipeline::MessageProcessor;

/// Tail of a user's in-flight update chain: the next update for the same
/// user waits on `done` before processing.
struct ChainTail {
    seq: u64,
    done: oneshot::Receiver<()>,
}

/// Pulls updates from the transport and spawns one worker per update.
pub struct Dispatcher {
    transport: Arc<dyn ChatTransport>,
    processor: Arc<MessageProcessor>,
    chains: Arc<DashMap<UserId, ChainTail>>,
    next_seq: AtomicU64,
    tracker: TaskTracker,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn ChatTransport>, processor: Arc<MessageProcessor>) -> Self {
        Self {
            transport,
            processor,
            chains: Arc::new(DashMap::new()),
            next_seq: AtomicU64::new(0),
            tracker: TaskTracker::new(),
        }
    }

    /// Runs until `cancel` fires or the update stream closes, then waits
    /// for in-flight replies to finish.
    pub async fn run(&self, cancel: CancellationToken) {
        info!("dispatch loop started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("shutdown requested, stopping dispatch loop");
                    break;
                }
                result = self.transport.recv_update() => match result {
                    Ok(update) => self.spawn_worker(update),
                    Err(err) => {
                        error!(error = %err, "update stream closed");
                        break;
                    }
                }
            }
        }

        self.tracker.close();
        info!("draining in-flight replies");
        self.tracker.wait().await;
        info!("dispatch loop stopped");
    }

    /// Number of users with at least one update currently in flight.
    pub fn pending_users(&self) -> usize {
        self.chains.len()
    }

    /// Spawns one worker for `update`, chained behind the user's previous
    /// in-flight update.
    ///
    /// The chain link is installed here, synchronously, so same-user order
    /// is fixed at arrival time regardless of how the runtime schedules
    /// the spawned tasks. The map entry is removed as soon as the last
    /// in-flight update for a user completes, so the map only ever holds
    /// users with work outstanding.
    fn spawn_worker(&self, update: selam_core::Update) {
        // Non-message updates carry no work; skip the chain entirely.
        let Some(user) = update.message.as_ref().map(|m| m.sender.id) else {
            return;
        };

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let (done_tx, done_rx) = oneshot::channel();
        let prev = self.chains.insert(user, ChainTail { seq, done: done_rx });

        let processor = self.processor.clone();
        let chains = self.chains.clone();

        self.tracker.spawn(async move {
            if let Some(tail) = prev {
                // An error here means the predecessor was dropped without
                // finishing; proceed either way.
                let _ = tail.done.await;
            }
            processor.process_update(&update).await;
            let _ = done_tx.send(());
            // A successor has already replaced the tail if one arrived.
            chains.remove_if(&user, |_, tail| tail.seq == seq);
        });
    }
}
