// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Selam relay bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Selam configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SelamConfig {
    /// Agent identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Remote completion API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Translation service settings.
    #[serde(default)]
    pub translate: TranslateConfig,

    /// Conversation history limits.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Message processor settings.
    #[serde(default)]
    pub processor: ProcessorConfig,

    /// Health gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent persona.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Inline system instruction overriding the built-in persona prompt.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Reply sent when message processing fails entirely.
    #[serde(default = "default_apology_message")]
    pub apology_message: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            system_prompt: None,
            apology_message: default_apology_message(),
        }
    }
}

fn default_agent_name() -> String {
    "selam".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_apology_message() -> String {
    "Oops! Something went wrong. \u{1F605}".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required to start the bot.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Keywords that make the bot engage in group chats without a mention.
    #[serde(default = "default_trigger_keywords")]
    pub trigger_keywords: Vec<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            trigger_keywords: default_trigger_keywords(),
        }
    }
}

fn default_trigger_keywords() -> Vec<String> {
    ["selam", "how are you", "joke", "fun", "guys"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Remote completion API configuration (Cloudflare Workers AI).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the completion endpoint; the model id is appended to it.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token for the completion API.
    #[serde(default)]
    pub token: Option<String>,

    /// Model identifier appended to the base URL.
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-attempt request timeout in seconds.
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request attempts (first try included).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff, in milliseconds.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Reply returned to callers when every attempt fails.
    #[serde(default = "default_apology_message")]
    pub fallback_message: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            model: default_model(),
            timeout_secs: default_api_timeout_secs(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            fallback_message: default_apology_message(),
        }
    }
}

fn default_model() -> String {
    "@cf/meta/llama-3-8b-instruct".to_string()
}

fn default_api_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

/// Translation service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TranslateConfig {
    /// Base URL of the translation endpoint.
    #[serde(default = "default_translate_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_translate_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translate_endpoint(),
            timeout_secs: default_translate_timeout_secs(),
        }
    }
}

fn default_translate_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_translate_timeout_secs() -> u64 {
    10
}

/// Conversation history limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Maximum total characters retained per user.
    #[serde(default = "default_history_max_chars")]
    pub max_chars: usize,

    /// Entries older than this many seconds are evicted.
    #[serde(default = "default_history_max_age_secs")]
    pub max_age_secs: u64,

    /// Maximum number of users tracked; least-recently-active users are
    /// evicted beyond this bound.
    #[serde(default = "default_history_max_users")]
    pub max_users: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_chars: default_history_max_chars(),
            max_age_secs: default_history_max_age_secs(),
            max_users: default_history_max_users(),
        }
    }
}

fn default_history_max_chars() -> usize {
    1000
}

fn default_history_max_age_secs() -> u64 {
    3600
}

fn default_history_max_users() -> usize {
    10_000
}

/// Message processor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Maximum number of chats tracked by the idempotency gate.
    #[serde(default = "default_max_tracked_chats")]
    pub max_tracked_chats: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_tracked_chats: default_max_tracked_chats(),
        }
    }
}

fn default_max_tracked_chats() -> usize {
    10_000
}

/// Health gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Enable the HTTP health endpoints.
    #[serde(default = "default_gateway_enabled")]
    pub enabled: bool,

    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: default_gateway_enabled(),
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_enabled() -> bool {
    true
}

fn default_gateway_host() -> String {
    "0.0.0.0".to_string()
}

fn default_gateway_port() -> u16 {
    8000
}
