// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language detection for the bridge's routing decisions.
//!
//! Detection is layered: script inspection first (Ethiopic text is always
//! Amharic), then marker-word lists for the languages statistical detection
//! handles poorly on short chat messages, then `whatlang` for everything
//! else. Afan Oromo in particular is absent from whatlang's model, so it is
//! recognized purely by its high-frequency function words.

use whatlang::{Detector, Lang as WhatLang};

/// Language tag carried alongside a pivot translation so the reply can be
/// rendered back in the sender's form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// The pivot language; no translation needed.
    English,
    /// Amharic written in Ge'ez script.
    Amharic,
    /// Amharic written phonetically in Latin script.
    AmharicLatin,
    /// Afan Oromo (Latin script).
    Oromo,
    /// Unrecognized script; treated like romanized Amharic by the bridge.
    Other,
}

/// High-frequency Afan Oromo function words. Two or more hits on a single
/// message is a strong signal on text this short.
const OROMO_MARKERS: &[&str] = &[
    "akkam", "nagaa", "maali", "maal", "jira", "jirta", "galatoomi", "hin", "ani", "ati", "isin",
    "garuu", "fayyaa",
];

/// Common English words that make a single short message unambiguous where
/// statistical detection would be unreliable.
const ENGLISH_MARKERS: &[&str] = &[
    "hello", "hi", "hey", "the", "you", "your", "how", "what", "why", "is", "are", "was", "i",
    "my", "me", "and", "not", "yes", "no", "please", "thanks",
];

/// Returns true when `c` is in the Ethiopic block.
fn is_ethiopic(c: char) -> bool {
    ('\u{1200}'..='\u{137F}').contains(&c)
}

/// Classifies a message for bridge routing.
pub fn detect_lang(text: &str) -> Lang {
    if text.chars().any(is_ethiopic) {
        return Lang::Amharic;
    }
    if !text.chars().any(|c| c.is_ascii_alphabetic()) {
        return Lang::Other;
    }

    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();

    let oromo_hits = words.iter().filter(|w| OROMO_MARKERS.contains(w)).count();
    if oromo_hits >= 2 {
        return Lang::Oromo;
    }

    let detector = Detector::new();
    if let Some(info) = detector.detect(text) {
        if info.lang() == WhatLang::Eng && info.is_reliable() {
            return Lang::English;
        }
    }

    if words.iter().any(|w| ENGLISH_MARKERS.contains(w)) {
        return Lang::English;
    }

    Lang::AmharicLatin
}
