// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Cloudflare Workers AI chat completion endpoint.
//!
//! Provides [`CompletionClient`] which handles request construction, bearer
//! authentication, failure classification, and bounded exponential backoff
//! for transient errors.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use selam_core::{AdapterType, CompletionProvider, HealthStatus, PluginAdapter, SelamError};
use tracing::{debug, error, info, warn};

use crate::DEFAULT_SYSTEM_INSTRUCTION;
use crate::types::{ApiErrorKind, ApiOutcome, CompletionRequest};

/// Connection parameters for [`CompletionClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Account-scoped base URL ending in `/ai/run/`.
    pub base_url: String,
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// Model identifier appended to the base URL.
    pub model: String,
    /// Per-request deadline.
    pub timeout: Duration,
    /// Total attempt budget, including the first attempt.
    pub max_retries: u32,
    /// First backoff delay; doubles after each retryable failure.
    pub retry_base_delay: Duration,
    /// Returned by [`CompletionClient::respond`] when every attempt fails.
    pub fallback_message: String,
    /// System message sent ahead of the user content.
    pub system_instruction: String,
}

impl ClientConfig {
    /// Builds a config with the default persona and retry settings for the
    /// given connection details.
    pub fn new(base_url: String, token: String, model: String) -> Self {
        Self {
            base_url,
            token,
            model,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(1000),
            fallback_message: "Oops! Something went wrong. \u{1F605}".to_string(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

/// HTTP client for Workers AI chat completions.
///
/// Classifies every failure into an [`ApiErrorKind`] and retries only the
/// infrastructure-level ones (network, timeout, 5xx) with exponential
/// backoff. The user-facing [`respond`](CompletionClient::respond) surface
/// absorbs all failures into the configured fallback message.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl CompletionClient {
    /// Creates a new Workers AI client.
    pub fn new(config: ClientConfig) -> Result<Self, SelamError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.token);
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer)
                .map_err(|e| SelamError::Config(format!("invalid API token header value: {e}")))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SelamError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, config })
    }

    /// Returns the model identifier this client sends requests to.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.config.base_url, self.config.model)
    }

    /// Runs the full attempt loop and returns the classified outcome.
    ///
    /// Retryable failures back off `base_delay * 2^attempt` between
    /// attempts; terminal failures return immediately. When the budget is
    /// exhausted the last failure is returned.
    pub async fn complete(&self, user_content: &str) -> ApiOutcome {
        let mut last_failure = None;

        for attempt in 0..self.config.max_retries {
            let outcome = self.attempt(user_content).await;
            match outcome {
                ApiOutcome::Success { .. } => {
                    debug!(attempt, "completion attempt succeeded");
                    return outcome;
                }
                ApiOutcome::Failure {
                    kind,
                    status,
                    elapsed,
                } => {
                    if !kind.is_retryable() {
                        debug!(attempt, %kind, ?status, "terminal completion failure");
                        return outcome;
                    }
                    warn!(
                        attempt,
                        %kind,
                        ?status,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "retryable completion failure"
                    );
                    last_failure = Some(outcome);
                    if attempt + 1 < self.config.max_retries {
                        let delay = backoff_delay(self.config.retry_base_delay, attempt);
                        debug!(delay_ms = delay.as_millis() as u64, "backing off before retry");
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        last_failure.unwrap_or(ApiOutcome::Failure {
            kind: ApiErrorKind::Unknown,
            status: None,
            elapsed: Duration::ZERO,
        })
    }

    /// Returns the model's reply, or the configured fallback message when
    /// every attempt fails. Never errors.
    pub async fn respond(&self, prompt: &str) -> String {
        match self.complete(prompt).await {
            ApiOutcome::Success { content, elapsed } => {
                info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "completion request succeeded"
                );
                content
            }
            ApiOutcome::Failure {
                kind,
                status,
                elapsed,
            } => {
                error!(
                    %kind,
                    ?status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "completion request failed: {}",
                    kind.describe()
                );
                self.config.fallback_message.clone()
            }
        }
    }

    /// Single-attempt liveness probe used by the health check.
    async fn probe(&self) -> bool {
        self.attempt("Hello").await.is_success()
    }

    /// Sends one request and classifies the result. Never retries.
    async fn attempt(&self, user_content: &str) -> ApiOutcome {
        let started = Instant::now();
        let payload = CompletionRequest::new(&self.config.system_instruction, user_content);

        let response = match self.client.post(self.endpoint()).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                let kind = if e.is_timeout() {
                    ApiErrorKind::Timeout
                } else {
                    ApiErrorKind::Network
                };
                debug!(%kind, error = %e, "completion request failed before a response");
                return ApiOutcome::Failure {
                    kind,
                    status: None,
                    elapsed: started.elapsed(),
                };
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let kind = if e.is_timeout() {
                    ApiErrorKind::Timeout
                } else {
                    ApiErrorKind::Network
                };
                return ApiOutcome::Failure {
                    kind,
                    status: Some(status.as_u16()),
                    elapsed: started.elapsed(),
                };
            }
        };

        classify_response(status, &body, started.elapsed())
    }
}

/// Largest exponent applied to the base delay. Attempts past this point
/// keep the capped delay instead of overflowing the doubling arithmetic.
const MAX_BACKOFF_EXPONENT: u32 = 16;

/// Doubling backoff: `base * 2^attempt`, with the exponent capped so large
/// retry budgets cannot overflow.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt.min(MAX_BACKOFF_EXPONENT)))
}

/// Classifies a received HTTP response into an [`ApiOutcome`].
///
/// The body must parse as JSON before the status is inspected, so a 5xx
/// with an HTML error page classifies as [`ApiErrorKind::InvalidResponse`]
/// rather than [`ApiErrorKind::Server`].
fn classify_response(status: StatusCode, body: &str, elapsed: Duration) -> ApiOutcome {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return ApiOutcome::Failure {
            kind: ApiErrorKind::InvalidResponse,
            status: Some(status.as_u16()),
            elapsed,
        };
    };

    let kind = match status.as_u16() {
        401 => Some(ApiErrorKind::Auth),
        429 => Some(ApiErrorKind::RateLimit),
        s if s >= 500 => Some(ApiErrorKind::Server),
        _ if !status.is_success() => Some(ApiErrorKind::Unknown),
        _ => None,
    };
    if let Some(kind) = kind {
        return ApiOutcome::Failure {
            kind,
            status: Some(status.as_u16()),
            elapsed,
        };
    }

    let success = value
        .get("success")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    let content = value
        .pointer("/result/response")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();

    if success && !content.is_empty() {
        ApiOutcome::Success {
            content: content.to_string(),
            elapsed,
        }
    } else {
        ApiOutcome::Failure {
            kind: ApiErrorKind::InvalidResponse,
            status: Some(status.as_u16()),
            elapsed,
        }
    }
}

#[async_trait]
impl PluginAdapter for CompletionClient {
    fn name(&self) -> &str {
        "workers-ai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, SelamError> {
        if self.probe().await {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(
                "completion endpoint unreachable or returning errors".to_string(),
            ))
        }
    }

    async fn shutdown(&self) -> Result<(), SelamError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for CompletionClient {
    async fn get_response(&self, prompt: &str) -> String {
        self.respond(prompt).await
    }
}
