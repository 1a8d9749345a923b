// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Selam binary entry point.
//!
//! Loads configuration, wires the adapters together, and runs the dispatch
//! loop until a shutdown signal arrives. The health gateway is served on a
//! background task when enabled.

use std::process::exit;
use std::sync::Arc;
use std::time::{Duration, Instant};

use selam_config::SelamConfig;
use selam_core::{ChatTransport, PluginAdapter, SelamError};
use selam_history::{HistoryLimits, HistoryStore, SystemClock};
use selam_lingua::{GoogleTranslator, LanguageBridge};
use selam_processor::{DedupGate, Dispatcher, EngagePolicy, MessageProcessor};
use selam_telegram::TelegramChannel;
use selam_workers_ai::{ClientConfig, CompletionClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("selam={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

fn build_provider(config: &SelamConfig) -> Result<Arc<CompletionClient>, SelamError> {
    let base_url = config
        .api
        .base_url
        .clone()
        .ok_or_else(|| SelamError::Config("api.base_url is required".into()))?;
    let token = config
        .api
        .token
        .clone()
        .ok_or_else(|| SelamError::Config("api.token is required".into()))?;

    let mut client_config = ClientConfig::new(base_url, token, config.api.model.clone());
    client_config.timeout = Duration::from_secs(config.api.timeout_secs);
    client_config.max_retries = config.api.max_retries;
    client_config.retry_base_delay = Duration::from_millis(config.api.retry_base_delay_ms);
    client_config.fallback_message = config.api.fallback_message.clone();
    if let Some(prompt) = &config.agent.system_prompt {
        client_config.system_instruction = prompt.clone();
    }

    Ok(Arc::new(CompletionClient::new(client_config)?))
}

async fn run(config: SelamConfig) -> Result<(), SelamError> {
    info!(
        agent = %config.agent.name,
        version = env!("CARGO_PKG_VERSION"),
        "starting"
    );

    let provider = build_provider(&config)?;

    let history = Arc::new(HistoryStore::new(
        HistoryLimits {
            max_chars: config.history.max_chars,
            max_age: Duration::from_secs(config.history.max_age_secs),
            max_users: config.history.max_users,
        },
        Arc::new(SystemClock),
    ));

    let translator = GoogleTranslator::new(
        config.translate.endpoint.clone(),
        Duration::from_secs(config.translate.timeout_secs),
    )?;
    let bridge = LanguageBridge::new(Arc::new(translator));

    // Validation guarantees the token is present.
    let bot_token = config
        .telegram
        .bot_token
        .as_deref()
        .ok_or_else(|| SelamError::Config("telegram.bot_token is required".into()))?;
    let mut channel = TelegramChannel::new(bot_token)?;
    channel.connect().await?;

    let engage = EngagePolicy::new(
        config.telegram.trigger_keywords.clone(),
        channel.bot_handle().to_string(),
    );
    let transport: Arc<dyn ChatTransport> = Arc::new(channel);

    let processor = Arc::new(MessageProcessor::new(
        provider.clone(),
        transport.clone(),
        history,
        bridge,
        engage,
        DedupGate::new(config.processor.max_tracked_chats),
        config.agent.apology_message.clone(),
    ));

    if config.gateway.enabled {
        let state = selam_gateway::GatewayState {
            provider: provider.clone(),
            started: Instant::now(),
            agent_name: config.agent.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };
        let server_config = selam_gateway::ServerConfig {
            host: config.gateway.host.clone(),
            port: config.gateway.port,
        };
        tokio::spawn(async move {
            if let Err(e) = selam_gateway::start_server(&server_config, state).await {
                tracing::error!(error = %e, "health server exited");
            }
        });
    }

    let cancel = selam_processor::install_signal_handler();
    Dispatcher::new(transport.clone(), processor).run(cancel).await;

    transport.shutdown().await?;
    provider.shutdown().await?;
    info!("shutdown complete");

    Ok(())
}

#[tokio::main]
async fn main() {
    let config = match selam_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            for error in &errors {
                eprintln!("config error: {error}");
            }
            exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    if let Err(e) = run(config).await {
        eprintln!("fatal: {e}");
        exit(1);
    }
}
