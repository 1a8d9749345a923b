// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bidirectional Latin/Ge'ez transliteration (SERA-style).
//!
//! The Ethiopic block is organized in rows of eight syllables per
//! consonant, one per vowel order. Both directions work on that structure:
//! a syllable is a row base plus a vowel column. Characters outside the
//! tables pass through unchanged, so digits, spaces, and foreign words
//! survive the round trip.

/// Latin vowel per Ethiopic column order. Column 5 (sadis) is the bare
/// consonant.
const VOWELS: [&str; 8] = ["e", "u", "i", "a", "ie", "", "o", "ua"];

/// Base codepoint of the vowel-carrier row used for standalone vowels.
const CARRIER_ROW: u32 = 0x12A0;

/// Two-letter consonant clusters, matched before single letters.
const CONSONANT_DIGRAPHS: &[(&str, u32)] = &[
    ("sh", 0x1238),
    ("ch", 0x1278),
    ("ny", 0x1298),
    ("zh", 0x12E0),
    ("ts", 0x1338),
    ("kh", 0x1280),
    ("gn", 0x1298),
];

fn single_consonant(c: char) -> Option<u32> {
    let base = match c {
        'h' => 0x1200,
        'l' => 0x1208,
        'm' => 0x1218,
        'r' => 0x1228,
        's' => 0x1230,
        'q' => 0x1240,
        'b' => 0x1260,
        'v' => 0x1268,
        't' => 0x1270,
        'c' => 0x1278,
        'n' => 0x1290,
        'k' => 0x12A8,
        'w' => 0x12C8,
        'z' => 0x12D8,
        'y' => 0x12E8,
        'd' => 0x12F0,
        'j' => 0x1300,
        'g' => 0x1308,
        'x' => 0x1338,
        'p' => 0x1350,
        'f' => 0x1348,
        _ => return None,
    };
    Some(base)
}

/// Latin rendering for each Ethiopic row base. Rows that exist only for
/// historic or labialized forms map onto their nearest plain consonant.
fn row_consonant(base: u32) -> Option<&'static str> {
    let latin = match base {
        0x1200 | 0x1210 | 0x1280 | 0x12B8 => "h",
        0x1208 => "l",
        0x1218 => "m",
        0x1220 | 0x1230 => "s",
        0x1228 => "r",
        0x1238 => "sh",
        0x1240 | 0x1250 => "q",
        0x1248 | 0x1258 => "qw",
        0x1260 => "b",
        0x1268 => "v",
        0x1270 => "t",
        0x1278 | 0x1328 => "ch",
        0x1288 | 0x12C0 => "hw",
        0x1290 => "n",
        0x1298 => "ny",
        0x12A0 | 0x12D0 => "",
        0x12A8 => "k",
        0x12B0 => "kw",
        0x12C8 => "w",
        0x12D8 => "z",
        0x12E0 => "zh",
        0x12E8 => "y",
        0x12F0 | 0x12F8 => "d",
        0x1300 => "j",
        0x1308 | 0x1318 => "g",
        0x1310 => "gw",
        0x1320 => "t",
        0x1330 | 0x1350 => "p",
        0x1338 | 0x1340 => "ts",
        0x1348 => "f",
        _ => return None,
    };
    Some(latin)
}

/// Converts Ge'ez text to its Latin phonetic form.
pub fn geez_to_latin(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let cp = ch as u32;
        match cp {
            0x1200..=0x1357 => {
                let offset = cp - 0x1200;
                let base = 0x1200 + (offset / 8) * 8;
                let col = (offset % 8) as usize;
                match row_consonant(base) {
                    Some(consonant) => {
                        out.push_str(consonant);
                        // A bare carrier syllable is just its vowel.
                        if consonant.is_empty() && VOWELS[col].is_empty() {
                            out.push('a');
                        } else {
                            out.push_str(VOWELS[col]);
                        }
                    }
                    None => out.push(ch),
                }
            }
            // Ethiopic punctuation.
            0x1361 => out.push(' '),
            0x1362 => out.push('.'),
            0x1363 => out.push(','),
            0x1364 => out.push(';'),
            0x1367 => out.push('?'),
            _ => out.push(ch),
        }
    }
    out
}

/// Converts Latin phonetic text to Ge'ez script.
///
/// Longest-match parse: consonant digraphs before single consonants, vowel
/// digraphs before single vowels. A consonant with no trailing vowel takes
/// the sixth (bare) order; a vowel with no leading consonant lands on the
/// carrier row.
pub fn latin_to_geez(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i].to_ascii_lowercase();
        if !c.is_ascii_alphabetic() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let mut base = None;
        if i + 1 < chars.len() {
            let next = chars[i + 1].to_ascii_lowercase();
            for (digraph, row) in CONSONANT_DIGRAPHS {
                let mut d = digraph.chars();
                if d.next() == Some(c) && d.next() == Some(next) {
                    base = Some(*row);
                    i += 2;
                    break;
                }
            }
        }
        if base.is_none() {
            if let Some(row) = single_consonant(c) {
                base = Some(row);
                i += 1;
            }
        }

        match base {
            Some(row) => {
                let (col, used) = parse_vowel(&chars, i);
                i += used;
                push_syllable(&mut out, row, col);
            }
            None => {
                let (col, used) = parse_vowel(&chars, i);
                if used == 0 {
                    out.push(chars[i]);
                    i += 1;
                } else {
                    i += used;
                    push_syllable(&mut out, CARRIER_ROW, col);
                }
            }
        }
    }
    out
}

/// Returns (vowel column, characters consumed). Zero consumed means no
/// vowel follows, which selects the bare sixth order.
fn parse_vowel(chars: &[char], i: usize) -> (usize, usize) {
    let Some(c) = chars.get(i).map(|ch| ch.to_ascii_lowercase()) else {
        return (5, 0);
    };
    let next = chars.get(i + 1).map(|ch| ch.to_ascii_lowercase());
    match (c, next) {
        ('i', Some('e')) | ('e', Some('e')) => (4, 2),
        ('u', Some('a')) => (7, 2),
        ('e', _) => (0, 1),
        ('u', _) => (1, 1),
        ('i', _) => (2, 1),
        ('a', _) => (3, 1),
        ('o', _) => (6, 1),
        _ => (5, 0),
    }
}

fn push_syllable(out: &mut String, base: u32, col: usize) {
    if let Some(ch) = char::from_u32(base + col as u32) {
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selam_to_geez() {
        assert_eq!(latin_to_geez("selam"), "\u{1230}\u{120B}\u{121D}");
    }

    #[test]
    fn selam_from_geez() {
        assert_eq!(geez_to_latin("\u{1230}\u{120B}\u{121D}"), "selam");
    }

    #[test]
    fn standalone_vowels_use_carrier_row() {
        // abeba: vowel carrier + be + ba
        assert_eq!(latin_to_geez("abeba"), "\u{12A3}\u{1260}\u{1263}");
        assert_eq!(geez_to_latin("\u{12A3}\u{1260}\u{1263}"), "abeba");
    }

    #[test]
    fn consonant_digraphs_round_trip() {
        // sha + i
        assert_eq!(latin_to_geez("shai"), "\u{123B}\u{12A2}");
        assert_eq!(geez_to_latin("\u{123B}\u{12A2}"), "shai");
    }

    #[test]
    fn bare_consonant_takes_sixth_order() {
        // "st" has no vowels at all.
        assert_eq!(latin_to_geez("st"), "\u{1235}\u{1275}");
    }

    #[test]
    fn non_alphabetic_passes_through() {
        assert_eq!(latin_to_geez("selam 123!"), "\u{1230}\u{120B}\u{121D} 123!");
    }

    #[test]
    fn non_ethiopic_text_passes_through_reverse() {
        assert_eq!(geez_to_latin("hello 123"), "hello 123");
    }

    #[test]
    fn ethiopic_punctuation_maps_to_ascii() {
        assert_eq!(geez_to_latin("\u{1230}\u{120B}\u{121D}\u{1362}"), "selam.");
        assert_eq!(geez_to_latin("\u{1218}\u{1363}"), "me,");
    }

    #[test]
    fn uppercase_input_is_folded() {
        assert_eq!(latin_to_geez("Selam"), "\u{1230}\u{120B}\u{121D}");
    }

    #[test]
    fn latin_round_trip_preserves_phonetics() {
        for word in ["selam", "dehna", "abeba", "wendim"] {
            let geez = latin_to_geez(word);
            assert_eq!(geez_to_latin(&geez), word, "round trip of {word}");
        }
    }
}
