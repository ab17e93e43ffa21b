//! Locale-aware string ordering.
//!
//! Strings are compared level by level, the way the root Unicode collation
//! orders Latin text: base letters first (case and accents ignored, with
//! whitespace and punctuation sorting ahead of digits, and digits ahead of
//! letters), then accents, then case with lowercase first. Only when every
//! level ties is the raw code point order consulted, so the ordering is total.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// ASCII punctuation and symbols in root collation order.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Combining marks in root collation secondary order.
const MARK_ORDER: &[char] = &[
    '\u{0301}', // acute
    '\u{0300}', // grave
    '\u{0306}', // breve
    '\u{0302}', // circumflex
    '\u{030C}', // caron
    '\u{030A}', // ring above
    '\u{0308}', // diaeresis
    '\u{030B}', // double acute
    '\u{0303}', // tilde
    '\u{0307}', // dot above
    '\u{0327}', // cedilla
    '\u{0328}', // ogonek
    '\u{0304}', // macron
];

const UNLISTED: u32 = 0x1000;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<(u8, u32)>,
    /// Mark weights attached to each base character, in order.
    secondary: Vec<Vec<u32>>,
    tertiary: Vec<bool>,
    raw: String,
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if !c.is_alphanumeric() {
        1
    } else if c.is_numeric() {
        2
    } else {
        3
    }
}

fn primary_weight(c: char) -> (u8, u32) {
    let class = char_class(c);
    let weight = match class {
        1 => PUNCTUATION_ORDER
            .chars()
            .position(|p| p == c)
            .map(|i| i as u32)
            .unwrap_or(UNLISTED + c as u32),
        _ => c as u32,
    };
    (class, weight)
}

fn mark_weight(mark: char) -> u32 {
    MARK_ORDER
        .iter()
        .position(|m| *m == mark)
        .map(|i| i as u32 + 1)
        .unwrap_or(UNLISTED + mark as u32)
}

pub fn collation_key(s: &str) -> CollationKey {
    let decomposed: Vec<char> = s.nfd().collect();

    let primary = decomposed
        .iter()
        .filter(|c| !is_combining_mark(**c))
        .flat_map(|c| c.to_lowercase())
        .map(primary_weight)
        .collect();

    let mut secondary: Vec<Vec<u32>> = Vec::new();
    for c in &decomposed {
        if is_combining_mark(*c) {
            match secondary.last_mut() {
                Some(marks) => marks.push(mark_weight(*c)),
                None => secondary.push(vec![mark_weight(*c)]),
            }
        } else {
            secondary.push(Vec::new());
        }
    }

    // `true` sorts after `false`, putting lowercase ahead of uppercase
    let tertiary = decomposed
        .iter()
        .filter(|c| !is_combining_mark(**c))
        .map(|c| c.is_uppercase())
        .collect();

    CollationKey {
        primary,
        secondary,
        tertiary,
        raw: s.to_string(),
    }
}

pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    collation_key(a).cmp(&collation_key(b))
}
