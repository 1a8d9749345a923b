// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram chat transport for the Selam relay bot.
//!
//! Implements [`ChatTransport`] over the Telegram Bot API via teloxide
//! long polling. Inbound messages are converted to core updates and
//! buffered on an mpsc channel; `/start` and `/help` are answered inside
//! the polling task and never reach the processor.

pub mod handler;

use async_trait::async_trait;
use selam_core::{
    AdapterType, ChatTransport, HealthStatus, MessageId as CoreMessageId, OutgoingMessage,
    PluginAdapter, SelamError, Update as CoreUpdate,
};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId as TgChatId, MessageId as TgMessageId, ReplyParameters};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Telegram transport implementing [`ChatTransport`].
///
/// Call [`connect`](TelegramChannel::connect) before use: it resolves the
/// bot's own identity via `getMe` (needed for mention and reply-to-self
/// detection) and starts the long polling task.
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<CoreUpdate>>,
    inbound_tx: mpsc::Sender<CoreUpdate>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
    bot_handle: String,
    bot_id: Option<u64>,
}

impl TelegramChannel {
    /// Creates a new Telegram transport from a bot token.
    pub fn new(bot_token: &str) -> Result<Self, SelamError> {
        if bot_token.trim().is_empty() {
            return Err(SelamError::Config(
                "telegram bot token cannot be empty".into(),
            ));
        }

        let (inbound_tx, inbound_rx) = mpsc::channel(100);

        Ok(Self {
            bot: Bot::new(bot_token),
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
            bot_handle: String::new(),
            bot_id: None,
        })
    }

    /// Resolves the bot identity and starts long polling.
    pub async fn connect(&mut self) -> Result<(), SelamError> {
        if self.polling_handle.is_some() {
            return Ok(()); // Already connected
        }

        let me = self.bot.get_me().await.map_err(|e| SelamError::Transport {
            message: format!("getMe failed: {e}"),
            source: Some(Box::new(e)),
        })?;
        self.bot_handle = me.username().to_string();
        self.bot_id = Some(me.id.0);

        let bot = self.bot.clone();
        let tx = self.inbound_tx.clone();
        let bot_id = self.bot_id;

        info!(bot = %self.bot_handle, "starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let handler =
                Update::filter_message().endpoint(move |bot: Bot, update: Update, msg: Message| {
                    let tx = tx.clone();
                    async move {
                        if let Some(reply) = msg.text().and_then(handler::command_reply) {
                            if let Err(e) = bot.send_message(msg.chat.id, reply).await {
                                warn!(error = %e, "failed to answer command");
                            }
                            return respond(());
                        }

                        match handler::to_core_update(i64::from(update.id.0), &msg, bot_id) {
                            Some(core_update) => {
                                if tx.send(core_update).await.is_err() {
                                    warn!("inbound channel closed, dropping update");
                                }
                            }
                            None => {
                                debug!(msg_id = msg.id.0, "ignoring unsupported message");
                            }
                        }

                        respond(())
                    }
                });

            Dispatcher::builder(bot, handler)
                .default_handler(|_| async {}) // Silently ignore non-message updates
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, SelamError> {
        // Check if the bot token is valid by calling getMe.
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), SelamError> {
        debug!("Telegram transport shutting down");
        // The polling handle is dropped with the transport, which aborts
        // the task. The dispatch loop stops calling recv_update() first.
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for TelegramChannel {
    async fn recv_update(&self) -> Result<CoreUpdate, SelamError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv()
            .await
            .ok_or_else(|| SelamError::transport("Telegram inbound channel closed"))
    }

    async fn send_message(&self, msg: OutgoingMessage) -> Result<CoreMessageId, SelamError> {
        let mut request = self.bot.send_message(TgChatId(msg.chat_id.0), &msg.text);
        if let Some(reply_to) = msg.reply_to {
            request = request.reply_parameters(ReplyParameters::new(TgMessageId(reply_to.0)));
        }

        let sent = request.await.map_err(|e| SelamError::Transport {
            message: format!("failed to send message: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(CoreMessageId(sent.id.0))
    }

    fn bot_handle(&self) -> &str {
        &self.bot_handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_token() {
        assert!(TelegramChannel::new("").is_err());
        assert!(TelegramChannel::new("   ").is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        let channel = TelegramChannel::new("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11").unwrap();
        // Handle is unknown until connect() resolves it.
        assert_eq!(channel.bot_handle(), "");
    }

    #[test]
    fn plugin_adapter_metadata() {
        let channel = TelegramChannel::new("test:token").unwrap();
        assert_eq!(channel.name(), "telegram");
        assert_eq!(channel.version(), semver::Version::new(0, 1, 0));
        assert_eq!(channel.adapter_type(), AdapterType::Channel);
    }
}
