// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language detection, Ge'ez transliteration, and the translation bridge.
//!
//! The bridge keeps the completion model monolingual: every inbound message
//! is normalized to English before prompting, and every reply is rendered
//! back into the sender's original form, including the Latin-script
//! (romanized) way many Amharic speakers type.

pub mod bridge;
pub mod script;
pub mod translate;
pub mod translit;

pub use bridge::LanguageBridge;
pub use script::{Lang, detect_lang};
pub use translate::{DEFAULT_TRANSLATE_ENDPOINT, GoogleTranslator, Translator};
pub use translit::{geez_to_latin, latin_to_geez};
