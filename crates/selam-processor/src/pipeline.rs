// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The reply pipeline: one inbound update in, at most one reply out.
//!
//! Order matters here. The engagement gate runs before dedup so the cursor
//! only moves for messages the bot actually answers; the cursor advances
//! whether the reply pipeline succeeded or not, so a poisoned message is
//! never retried on redelivery.

use std::sync::Arc;

use selam_core::{
    ChatTransport, CompletionProvider, IncomingMessage, OutgoingMessage, SelamError, Update,
};
use selam_history::HistoryStore;
use selam_lingua::LanguageBridge;
use tracing::{debug, error, warn};

use crate::dedup::DedupGate;
use crate::engage::EngagePolicy;
use crate::prompt;

/// Turns admitted updates into translated, history-aware replies.
pub struct MessageProcessor {
    provider: Arc<dyn CompletionProvider>,
    transport: Arc<dyn ChatTransport>,
    history: Arc<HistoryStore>,
    bridge: LanguageBridge,
    engage: EngagePolicy,
    dedup: DedupGate,
    apology: String,
}

impl MessageProcessor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        transport: Arc<dyn ChatTransport>,
        history: Arc<HistoryStore>,
        bridge: LanguageBridge,
        engage: EngagePolicy,
        dedup: DedupGate,
        apology: String,
    ) -> Self {
        Self {
            provider,
            transport,
            history,
            bridge,
            engage,
            dedup,
            apology,
        }
    }

    /// Handles one update end to end. Never returns an error: failures in
    /// the reply pipeline surface to the user as the apology message.
    pub async fn process_update(&self, update: &Update) {
        let Some(message) = &update.message else {
            debug!(update_id = update.id.0, "ignoring non-message update");
            return;
        };
        if message.text.trim().is_empty() {
            return;
        }
        if !self.engage.should_engage(update.chat_kind, message) {
            debug!(
                update_id = update.id.0,
                chat_id = update.chat_id.0,
                "message does not engage the bot"
            );
            return;
        }
        if !self.dedup.admit(update.chat_id, update.id) {
            debug!(
                update_id = update.id.0,
                chat_id = update.chat_id.0,
                "dropping redelivered update"
            );
            return;
        }

        if let Err(err) = self.respond(update, message).await {
            warn!(
                update_id = update.id.0,
                error = %err,
                "reply pipeline failed, sending apology"
            );
            let apology = OutgoingMessage {
                chat_id: update.chat_id,
                text: self.apology.clone(),
                reply_to: Some(message.id),
            };
            if let Err(send_err) = self.transport.send_message(apology).await {
                error!(error = %send_err, "failed to deliver apology message");
            }
        }

        // The cursor moves even after a failure so the update is not
        // reprocessed on redelivery.
        self.dedup.advance(update.chat_id, update.id);
    }

    async fn respond(&self, update: &Update, message: &IncomingMessage) -> Result<(), SelamError> {
        self.history.add_message(message.sender.id, &message.text);
        let raw_history = self.history.get_history(message.sender.id);

        let (history_pivot, _) = self.bridge.to_pivot(&raw_history).await?;
        let (text_pivot, lang) = self.bridge.to_pivot(&message.text).await?;

        let reply_sender = message.reply_to.as_ref().map(|r| &r.sender);
        let tagged = prompt::tag_message(&message.sender, &text_pivot, reply_sender);
        let prompt = prompt::compose(&history_pivot, &tagged);

        let pivot_reply = self.provider.get_response(&prompt).await;
        let rendered = self.bridge.from_pivot(&pivot_reply, lang).await?;

        self.transport
            .send_message(OutgoingMessage {
                chat_id: update.chat_id,
                text: rendered,
                reply_to: Some(message.id),
            })
            .await?;
        Ok(())
    }
}
