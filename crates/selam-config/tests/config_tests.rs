// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Selam configuration system.

use selam_config::model::SelamConfig;
use selam_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_selam_config() {
    let toml = r#"
[agent]
name = "test-agent"
log_level = "debug"
apology_message = "sorry!"

[telegram]
bot_token = "123:ABC"
trigger_keywords = ["hey", "bot"]

[api]
base_url = "https://example.com/ai/run/"
token = "cf-token"
model = "@cf/test/model"
timeout_secs = 5
max_retries = 2
retry_base_delay_ms = 250
fallback_message = "fallback"

[translate]
endpoint = "http://localhost:9999"
timeout_secs = 3

[history]
max_chars = 500
max_age_secs = 120
max_users = 50

[processor]
max_tracked_chats = 100

[gateway]
enabled = false
host = "127.0.0.1"
port = 9000
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "test-agent");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.agent.apology_message, "sorry!");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.telegram.trigger_keywords, vec!["hey", "bot"]);
    assert_eq!(
        config.api.base_url.as_deref(),
        Some("https://example.com/ai/run/")
    );
    assert_eq!(config.api.token.as_deref(), Some("cf-token"));
    assert_eq!(config.api.model, "@cf/test/model");
    assert_eq!(config.api.timeout_secs, 5);
    assert_eq!(config.api.max_retries, 2);
    assert_eq!(config.api.retry_base_delay_ms, 250);
    assert_eq!(config.api.fallback_message, "fallback");
    assert_eq!(config.translate.endpoint, "http://localhost:9999");
    assert_eq!(config.history.max_chars, 500);
    assert_eq!(config.history.max_age_secs, 120);
    assert_eq!(config.history.max_users, 50);
    assert_eq!(config.processor.max_tracked_chats, 100);
    assert!(!config.gateway.enabled);
    assert_eq!(config.gateway.port, 9000);
}

/// Unknown field in [agent] section produces an error.
#[test]
fn unknown_field_in_agent_produces_error() {
    let toml = r#"
[agent]
naem = "test"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("naem"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown field in [telegram] section produces an error.
#[test]
fn unknown_field_in_telegram_produces_error() {
    let toml = r#"
[telegram]
bot_tken = "abc"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("bot_tken"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let toml = "";
    let config = load_config_from_str(toml).expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "selam");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.telegram.bot_token.is_none());
    assert!(
        config
            .telegram
            .trigger_keywords
            .contains(&"selam".to_string())
    );
    assert!(config.api.base_url.is_none());
    assert_eq!(config.api.model, "@cf/meta/llama-3-8b-instruct");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.api.max_retries, 3);
    assert_eq!(config.api.retry_base_delay_ms, 1000);
    assert_eq!(config.history.max_chars, 1000);
    assert_eq!(config.history.max_age_secs, 3600);
    assert!(config.gateway.enabled);
    assert_eq!(config.gateway.port, 8000);
}

/// Environment-style override maps SELAM_TELEGRAM_BOT_TOKEN to
/// telegram.bot_token (NOT telegram.bot.token).
#[test]
fn override_maps_to_bot_token_key() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let toml_content = r#"
[telegram]
bot_token = "from-toml"
"#;

    let config: SelamConfig = Figment::new()
        .merge(Serialized::defaults(SelamConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("telegram.bot_token", "from-env"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.telegram.bot_token.as_deref(), Some("from-env"));
}

/// Validation fails fast when the bot token is absent.
#[test]
fn validate_rejects_missing_bot_token() {
    let errors = load_and_validate_str("").expect_err("missing bot token should fail");
    assert!(
        errors
            .iter()
            .any(|e| e.to_string().contains("telegram.bot_token"))
    );
}

/// Validation passes for a minimal config with a bot token.
#[test]
fn validate_accepts_minimal_config() {
    let toml = r#"
[telegram]
bot_token = "123456:ABC-DEF"
"#;
    let config = load_and_validate_str(toml).expect("minimal config should validate");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123456:ABC-DEF"));
}
