//! Normalized text plus lemma string, shared by dictionary-driven scorers.

use crate::annotate::{annotate_or_fallback, Annotator};
use crate::text::{count_matches, normalize, padded_lemma_string};

use super::Language;

/// A text prepared for dictionary matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchContext {
    /// Lower-cased, whitespace-collapsed, trimmed text.
    pub normalized: String,
    /// Content lemmas joined by single spaces, padded on both ends.
    pub padded_lemmas: String,
}

impl MatchContext {
    /// Normalize `text` and lemmatize it through `annotator`.
    pub fn build(annotator: &dyn Annotator, text: &str, language: Language) -> Self {
        let normalized = normalize(text);
        let annotation = annotate_or_fallback(annotator, &normalized, language);
        Self {
            padded_lemmas: padded_lemma_string(annotation.content_lemmas()),
            normalized,
        }
    }

    /// Number of distinct `terms` that match this text.
    pub fn count<'a, I>(&self, terms: I) -> usize
    where
        I: IntoIterator<Item = &'a String>,
    {
        count_matches(terms, &self.padded_lemmas, &self.normalized)
    }
}
