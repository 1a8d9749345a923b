// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request/response types and failure classification for the Workers AI API.

use std::time::Duration;

use serde::Serialize;

/// Classified failure category for a completion attempt.
///
/// Drives both retry policy and operator-facing log messages. Only
/// infrastructure-level failures ([`Network`](ApiErrorKind::Network),
/// [`Timeout`](ApiErrorKind::Timeout), [`Server`](ApiErrorKind::Server))
/// are retried; everything else terminates the attempt loop immediately
/// because retrying cannot help (bad credentials, quota exhaustion,
/// malformed payloads).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Connection-level failure before a response arrived.
    Network,
    /// The request exceeded the configured deadline.
    Timeout,
    /// HTTP 401: the bearer token was rejected.
    Auth,
    /// HTTP 429: quota or rate limit exhausted.
    RateLimit,
    /// HTTP 5xx with a well-formed JSON body.
    Server,
    /// Non-JSON body, missing success flag, or empty completion text.
    InvalidResponse,
    /// Non-2xx status not covered by a more specific category.
    Unknown,
}

impl ApiErrorKind {
    /// Returns true when another attempt has a chance of succeeding.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Network | Self::Timeout | Self::Server)
    }

    /// Operator-facing description for error logs.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Network => "network failure reaching the completion API",
            Self::Timeout => "completion request timed out",
            Self::Auth => "completion API rejected the token",
            Self::RateLimit => "completion API rate limit exhausted",
            Self::Server => "completion API server error",
            Self::InvalidResponse => "completion API returned an unusable body",
            Self::Unknown => "completion request failed for an unclassified reason",
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Auth => "auth",
            Self::RateLimit => "rate_limit",
            Self::Server => "server",
            Self::InvalidResponse => "invalid_response",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Terminal result of a completion call, after all retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    /// The model produced a non-empty reply.
    Success {
        content: String,
        /// Wall-clock time of the successful attempt only.
        elapsed: Duration,
    },
    /// Every attempt failed; this is the classification of the last one.
    Failure {
        kind: ApiErrorKind,
        /// HTTP status of the final attempt, when a response arrived at all.
        status: Option<u16>,
        elapsed: Duration,
    },
}

impl ApiOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// A single role-tagged message in the chat completion payload.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Request body for `POST {base_url}{model}`.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Builds the two-message system + user payload the API expects.
    pub fn new(system_instruction: &str, user_content: &str) -> Self {
        Self {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_instruction.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_content.to_string(),
                },
            ],
        }
    }
}
