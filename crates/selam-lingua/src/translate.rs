// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Machine translation client.
//!
//! [`GoogleTranslator`] talks to the unauthenticated `translate_a/single`
//! endpoint with `client=gtx`. The response is a nested JSON array whose
//! first element holds the translated segments; everything else in it is
//! ignored.

use std::time::Duration;

use async_trait::async_trait;
use selam_core::SelamError;
use tracing::debug;

/// Default endpoint for [`GoogleTranslator`].
pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com";

/// Adapter for a text translation backend.
///
/// `source` and `target` are ISO 639-1 codes (`am`, `en`, `om`). Unlike the
/// completion provider this trait is fallible: the caller decides whether a
/// failed translation aborts the reply.
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    async fn translate(&self, text: &str, source: &str, target: &str)
    -> Result<String, SelamError>;
}

/// Google Translate web-endpoint client.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    /// Creates a translator against `base_url` with a per-request deadline.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, SelamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SelamError::Translation {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, SelamError> {
        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| SelamError::Translation {
                message: format!("translation request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SelamError::translation(format!(
                "translation endpoint returned {status}"
            )));
        }

        let body = response.text().await.map_err(|e| SelamError::Translation {
            message: format!("failed to read translation body: {e}"),
            source: Some(Box::new(e)),
        })?;

        let translated = parse_translation(&body)?;
        debug!(source, target, chars = translated.chars().count(), "translated text");
        Ok(translated)
    }
}

/// Extracts and concatenates the translated segments from a
/// `translate_a/single` response body.
fn parse_translation(body: &str) -> Result<String, SelamError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        SelamError::translation(format!("translation response was not JSON: {e}"))
    })?;

    let segments = value
        .get(0)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| SelamError::translation("unexpected translation response shape"))?;

    let mut out = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(serde_json::Value::as_str) {
            out.push_str(piece);
        }
    }

    if out.is_empty() {
        return Err(SelamError::translation(
            "translation response contained no text",
        ));
    }
    Ok(out)
}
