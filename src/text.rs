//! Shared text helpers: normalization, term matching, sentence splitting
//! and fixed-precision rounding.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Sentence boundary: one or more terminators followed by whitespace or end of text.
    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"[.!?]+(?:\s+|$)").unwrap();
}

/// Lower-case, collapse whitespace runs to a single space, trim.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join lemmas with single spaces and pad with a leading and trailing space,
/// so whole-token membership is a plain `contains(" term ")`.
pub fn padded_lemma_string<I, S>(lemmas: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::from(" ");
    for lemma in lemmas {
        out.push_str(lemma.as_ref());
        out.push(' ');
    }
    out
}

/// A dictionary term matches if it is a whole token of the padded lemma
/// string, or a raw substring of the normalized text.
///
/// The substring branch deliberately over-matches (inflected forms, terms
/// embedded in longer words); scores depend on it.
pub fn term_matches(term: &str, padded_lemmas: &str, normalized: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    padded_lemmas.contains(&format!(" {} ", term)) || normalized.contains(term)
}

/// Count how many distinct terms match under [`term_matches`].
pub fn count_matches<'a, I>(terms: I, padded_lemmas: &str, normalized: &str) -> usize
where
    I: IntoIterator<Item = &'a String>,
{
    terms
        .into_iter()
        .filter(|t| term_matches(t, padded_lemmas, normalized))
        .count()
}

/// A sentence and its byte offset in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub offset: usize,
}

/// Split text into trimmed sentences, keeping terminal punctuation.
/// Empty fragments are dropped.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BOUNDARY.find_iter(text) {
        let end = m.start() + m.as_str().trim_end().len();
        push_trimmed(&mut sentences, text, start, end);
        start = m.end();
    }
    if start < text.len() {
        push_trimmed(&mut sentences, text, start, text.len());
    }

    sentences
}

fn push_trimmed(out: &mut Vec<Sentence>, text: &str, start: usize, end: usize) {
    let raw = &text[start..end];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let leading = raw.len() - raw.trim_start().len();
    out.push(Sentence {
        text: trimmed.to_string(),
        offset: start + leading,
    });
}

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Truncate to at most `max_chars` characters, ending with `...` when cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars < 3 {
        return ".".repeat(max_chars);
    }
    let keep = max_chars - 3;
    let mut out: String = text.chars().take(keep).collect();
    out.truncate(out.trim_end().len());
    out.push_str("...");
    out
}
