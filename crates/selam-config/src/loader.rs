// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./selam.toml` > `~/.config/selam/selam.toml` >
//! `/etc/selam/selam.toml` with environment variable overrides via the
//! `SELAM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SelamConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/selam/selam.toml` (system-wide)
/// 3. `~/.config/selam/selam.toml` (user XDG config)
/// 4. `./selam.toml` (local directory)
/// 5. `SELAM_*` environment variables
pub fn load_config() -> Result<SelamConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SelamConfig::default()))
        .merge(Toml::file("/etc/selam/selam.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("selam/selam.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("selam.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<SelamConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SelamConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SelamConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SelamConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `SELAM_TELEGRAM_BOT_TOKEN`
/// must map to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("SELAM_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SELAM_TELEGRAM_BOT_TOKEN -> "telegram_bot_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("api_", "api.", 1)
            .replacen("translate_", "translate.", 1)
            .replacen("history_", "history.", 1)
            .replacen("processor_", "processor.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
