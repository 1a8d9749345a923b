// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The language bridge: everything the model sees is English.
//!
//! Inbound text is normalized to the English pivot along with a tag
//! recording the sender's original form; outbound text is rendered back
//! into that form. Romanized Amharic takes a double hop: transliterate to
//! Ge'ez, translate to English, and the reverse on the way out so the
//! sender reads Latin script again.

use std::sync::Arc;

use selam_core::SelamError;
use tracing::debug;

use crate::script::{Lang, detect_lang};
use crate::translate::Translator;
use crate::translit::{geez_to_latin, latin_to_geez};

/// Routes text between the sender's language and the English pivot.
#[derive(Clone)]
pub struct LanguageBridge {
    translator: Arc<dyn Translator>,
}

impl LanguageBridge {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Normalizes `text` to English, returning the pivot text and the
    /// detected form for the return trip.
    ///
    /// Empty and whitespace-only input short-circuits without touching the
    /// translator.
    pub async fn to_pivot(&self, text: &str) -> Result<(String, Lang), SelamError> {
        if text.trim().is_empty() {
            return Ok((text.to_string(), Lang::English));
        }

        let lang = detect_lang(text);
        debug!(?lang, "detected message language");
        let pivot = match lang {
            Lang::English => text.to_string(),
            Lang::Amharic => self.translator.translate(text, "am", "en").await?,
            Lang::Oromo => self.translator.translate(text, "om", "en").await?,
            Lang::AmharicLatin | Lang::Other => {
                let geez = latin_to_geez(text);
                self.translator.translate(&geez, "am", "en").await?
            }
        };
        Ok((pivot, lang))
    }

    /// Renders English pivot text back into the sender's form.
    pub async fn from_pivot(&self, text: &str, lang: Lang) -> Result<String, SelamError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        match lang {
            Lang::English => Ok(text.to_string()),
            Lang::Amharic => self.translator.translate(text, "en", "am").await,
            Lang::Oromo => self.translator.translate(text, "en", "om").await,
            Lang::AmharicLatin | Lang::Other => {
                let geez = self.translator.translate(text, "en", "am").await?;
                Ok(geez_to_latin(&geez))
            }
        }
    }
}
