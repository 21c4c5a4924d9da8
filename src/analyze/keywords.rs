//! Frequency-ranked keyword extraction.

use std::collections::HashMap;
use std::sync::Arc;

use crate::annotate::{annotate_or_fallback, Annotator, Token};
use crate::error::{AnalysisError, Result};

use super::{Language, LanguageDetector};

/// Lemmas must be longer than this many characters to count.
const MIN_KEYWORD_CHARS: usize = 3;

/// Extracts the most frequent content lemmas.
pub struct KeywordExtractor {
    annotator: Arc<dyn Annotator>,
    detector: LanguageDetector,
}

impl KeywordExtractor {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self {
            annotator,
            detector: LanguageDetector::new(),
        }
    }

    /// Return up to `max_keywords` lemmas, most frequent first. Equal
    /// frequencies keep first-seen order. `max_keywords == 0` is rejected.
    pub fn extract(
        &self,
        text: &str,
        language: Option<Language>,
        max_keywords: usize,
    ) -> Result<Vec<String>> {
        if max_keywords == 0 {
            return Err(AnalysisError::InvalidArgument(
                "max_keywords must be at least 1".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let language = language.unwrap_or_else(|| self.detector.detect(text));
        let annotation = annotate_or_fallback(self.annotator.as_ref(), text, language);
        Ok(rank_keywords(&annotation.tokens, max_keywords))
    }
}

/// Count qualifying lemmas and return the `max` most frequent.
pub fn rank_keywords(tokens: &[Token], max: usize) -> Vec<String> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokens {
        if !token.is_alpha || token.is_stop || token.is_punct {
            continue;
        }
        let lemma = token.lemma.to_lowercase();
        if lemma.chars().count() <= MIN_KEYWORD_CHARS {
            continue;
        }
        match index.get(&lemma) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(lemma.clone(), order.len());
                order.push((lemma, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.into_iter().take(max).map(|(lemma, _)| lemma).collect()
}
