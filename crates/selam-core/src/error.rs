// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Selam relay bot.

use thiserror::Error;

/// The primary error type used across all Selam adapter traits and core operations.
#[derive(Debug, Error)]
pub enum SelamError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Chat transport errors (polling failure, message delivery, malformed update).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Completion provider errors (API failure, malformed response body).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Translation or transliteration errors from the language bridge.
    #[error("translation error: {message}")]
    Translation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Message-processing pipeline errors not covered by a more specific variant.
    #[error("processing error: {0}")]
    Processing(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SelamError {
    /// Convenience constructor for a transport error without an underlying source.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Convenience constructor for a translation error without an underlying source.
    pub fn translation(message: impl Into<String>) -> Self {
        Self::Translation {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_has_all_variants() {
        let _config = SelamError::Config("test".into());
        let _transport = SelamError::Transport {
            message: "test".into(),
            source: None,
        };
        let _provider = SelamError::Provider {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _translation = SelamError::translation("test");
        let _processing = SelamError::Processing("test".into());
        let _timeout = SelamError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = SelamError::Internal("test".into());
    }

    #[test]
    fn display_includes_message() {
        let err = SelamError::transport("polling stream closed");
        assert_eq!(err.to_string(), "transport error: polling stream closed");
    }
}
