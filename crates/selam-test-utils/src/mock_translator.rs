// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted translator for bridge and pipeline tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use selam_core::SelamError;
use selam_lingua::Translator;

/// Behavior of the mock translator.
enum Mode {
    /// Return the input unchanged.
    Identity,
    /// Return the same fixed string for every call.
    Fixed(String),
    /// Fail every call with a translation error.
    Failing,
}

/// A scripted [`Translator`] that records every call.
pub struct MockTranslator {
    mode: Mode,
    calls: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl MockTranslator {
    /// Translator that echoes its input. Useful when the test only cares
    /// about pipeline flow, not translation content.
    pub fn identity() -> Self {
        Self {
            mode: Mode::Identity,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Translator that returns `text` for every call.
    pub fn fixed(text: &str) -> Self {
        Self {
            mode: Mode::Fixed(text.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Translator that fails every call.
    pub fn failing() -> Self {
        Self {
            mode: Mode::Failing,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All `(text, source, target)` calls made so far.
    pub async fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, SelamError> {
        self.calls
            .lock()
            .await
            .push((text.to_string(), source.to_string(), target.to_string()));
        match &self.mode {
            Mode::Identity => Ok(text.to_string()),
            Mode::Fixed(reply) => Ok(reply.clone()),
            Mode::Failing => Err(SelamError::translation("scripted translation failure")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identity_echoes_and_records() {
        let translator = MockTranslator::identity();
        let out = translator.translate("hello", "en", "am").await.unwrap();
        assert_eq!(out, "hello");
        assert_eq!(
            translator.calls().await,
            vec![("hello".to_string(), "en".to_string(), "am".to_string())]
        );
    }

    #[tokio::test]
    async fn failing_returns_translation_error() {
        let translator = MockTranslator::failing();
        let err = translator.translate("x", "am", "en").await.unwrap_err();
        assert!(matches!(err, SelamError::Translation { .. }));
    }
}
