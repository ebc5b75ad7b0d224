//! Text canonicalization and French singularization heuristics.
//!
//! Every string the engine compares goes through [`normalize`] first, so
//! matching is insensitive to case, accents and punctuation. Singularization
//! is a small suffix-rule table, not a morphological analyzer.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Upper bound on tokens produced by [`tokenize`], so pathological input
/// stays cheap to process on every keystroke.
pub const MAX_TOKENS: usize = 12;

/// Canonicalize a string for comparison: lowercase, strip diacritics,
/// collapse punctuation and separator runs to single spaces, trim.
///
/// Total and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Split normalized text into tokens, discarding tokens shorter than two
/// characters and keeping at most [`MAX_TOKENS`].
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|t| t.chars().count() >= 2)
        .take(MAX_TOKENS)
        .map(str::to_string)
        .collect()
}

/// Explicit singular exceptions checked before the suffix rules.
const SINGULAR_EXCEPTIONS: &[(&str, &str)] = &[
    ("œufs", "oeuf"),
    ("oeufs", "oeuf"),
    ("pdt", "pomme de terre"),
];

/// Reduce a French word to a heuristic singular form.
///
/// Checks the exception table, then ordered suffix rules: "-eaux" → "-eau",
/// "-aux" → "-al" (only for words longer than three characters), trailing
/// "x", trailing "s", trailing "es". First match wins.
pub fn singularize(word: &str) -> String {
    let w = word.trim().to_lowercase();

    for (plural, singular) in SINGULAR_EXCEPTIONS {
        if w == *plural {
            return (*singular).to_string();
        }
    }

    if let Some(stem) = w.strip_suffix("eaux") {
        return format!("{stem}eau");
    }
    if w.chars().count() > 3 {
        if let Some(stem) = w.strip_suffix("aux") {
            return format!("{stem}al");
        }
    }
    if let Some(stem) = w.strip_suffix('x') {
        return stem.to_string();
    }
    if let Some(stem) = w.strip_suffix('s') {
        return stem.to_string();
    }
    if let Some(stem) = w.strip_suffix("es") {
        return stem.to_string();
    }
    w
}

/// Drop the trailing "s" of every word in a phrase.
///
/// Cheap plural tolerance for substring checks over multi-word phrases,
/// where [`singularize`] would only touch the last word.
pub fn strip_plural_s(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|w| w.strip_suffix('s').unwrap_or(w))
        .collect::<Vec<_>>()
        .join(" ")
}
