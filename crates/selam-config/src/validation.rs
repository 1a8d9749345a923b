// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. The bot token check enforces the fail-fast startup contract:
//! the process must not come up without a way to reach the chat platform.

use selam_core::SelamError;

use crate::model::SelamConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects all violations instead of failing fast so operators see every
/// problem in one pass.
pub fn validate_config(config: &SelamConfig) -> Result<(), Vec<SelamError>> {
    let mut errors = Vec::new();

    match &config.telegram.bot_token {
        None => errors.push(SelamError::Config(
            "telegram.bot_token is required (set SELAM_TELEGRAM_BOT_TOKEN)".to_string(),
        )),
        Some(token) if token.trim().is_empty() => errors.push(SelamError::Config(
            "telegram.bot_token must not be empty".to_string(),
        )),
        Some(_) => {}
    }

    if config.api.max_retries == 0 {
        errors.push(SelamError::Config(format!(
            "api.max_retries must be at least 1, got {}",
            config.api.max_retries
        )));
    }

    if config.api.timeout_secs == 0 {
        errors.push(SelamError::Config(
            "api.timeout_secs must be positive".to_string(),
        ));
    }

    if config.history.max_chars == 0 {
        errors.push(SelamError::Config(
            "history.max_chars must be positive".to_string(),
        ));
    }

    if config.history.max_users == 0 {
        errors.push(SelamError::Config(
            "history.max_users must be positive".to_string(),
        ));
    }

    if config.processor.max_tracked_chats == 0 {
        errors.push(SelamError::Config(
            "processor.max_tracked_chats must be positive".to_string(),
        ));
    }

    if config.gateway.host.trim().is_empty() {
        errors.push(SelamError::Config(
            "gateway.host must not be empty".to_string(),
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> SelamConfig {
        let mut config = SelamConfig::default();
        config.telegram.bot_token = Some("123456:test-token".into());
        config
    }

    #[test]
    fn accepts_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn rejects_missing_bot_token() {
        let config = SelamConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("telegram.bot_token"))
        );
    }

    #[test]
    fn rejects_empty_bot_token() {
        let mut config = SelamConfig::default();
        config.telegram.bot_token = Some("   ".into());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_zero_retries() {
        let mut config = valid_config();
        config.api.max_retries = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("api.max_retries"));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = SelamConfig::default();
        config.history.max_chars = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
