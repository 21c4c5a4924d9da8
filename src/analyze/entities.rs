//! Named-entity normalization and ticker extraction.

use std::sync::Arc;

use crate::annotate::{annotate_or_fallback, Annotator, EntitySpan};

use super::tickers::extract_tickers;
use super::{EntityBag, EntityCategory, Language, LanguageDetector};

/// Folds annotator entity spans into the fixed entity categories.
pub struct EntityExtractor {
    annotator: Arc<dyn Annotator>,
    detector: LanguageDetector,
}

impl EntityExtractor {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self {
            annotator,
            detector: LanguageDetector::new(),
        }
    }

    /// Extract entities from `text`. Empty text yields an empty bag with
    /// every category present.
    pub fn extract(&self, text: &str, language: Option<Language>) -> EntityBag {
        if text.trim().is_empty() {
            return EntityBag::default();
        }
        let language = language.unwrap_or_else(|| self.detector.detect(text));
        let annotation = annotate_or_fallback(self.annotator.as_ref(), text, language);
        bag_from_spans(&annotation.entities)
    }

    /// Candidate ticker symbols in `text`.
    pub fn tickers(&self, text: &str) -> Vec<String> {
        extract_tickers(text)
    }
}

/// Route spans into an [`EntityBag`], dropping unknown labels and exact duplicates.
pub fn bag_from_spans(spans: &[EntitySpan]) -> EntityBag {
    let mut bag = EntityBag::default();
    for span in spans {
        if let Some(category) = EntityCategory::from_label(&span.label) {
            bag.insert(category, &span.text);
        }
    }
    bag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{LexiconAnnotator, NullAnnotator};

    fn span(text: &str, label: &str) -> EntitySpan {
        EntitySpan {
            text: text.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_bag_from_spans_routes_and_dedups() {
        let bag = bag_from_spans(&[
            span("Apple", "ORG"),
            span("Madrid", "GPE"),
            span("Europa", "LOC"),
            span("Apple", "ORG"),
            span("latinos", "NORP"),
            span("$5 billion", "MONEY"),
            span("2024", "DATE"),
            span("Tim Cook", "PERSON"),
        ]);
        assert_eq!(bag.organizations, vec!["Apple"]);
        assert_eq!(bag.geopolitical, vec!["Madrid", "Europa"]);
        assert_eq!(bag.monetary, vec!["$5 billion"]);
        assert_eq!(bag.dates, vec!["2024"]);
        assert_eq!(bag.persons, vec!["Tim Cook"]);
    }

    #[test]
    fn test_extract_with_lexicon() {
        let extractor = EntityExtractor::new(Arc::new(LexiconAnnotator));
        let bag = extractor.extract(
            "Shares of Apple rose in New York after Tim Cook announced $2 billion in buybacks.",
            None,
        );
        assert_eq!(bag.organizations, vec!["Apple"]);
        assert_eq!(bag.geopolitical, vec!["New York"]);
        assert_eq!(bag.persons, vec!["Tim Cook"]);
        assert_eq!(bag.monetary, vec!["$2 billion"]);
    }

    #[test]
    fn test_empty_text_has_empty_bag() {
        let extractor = EntityExtractor::new(Arc::new(LexiconAnnotator));
        let bag = extractor.extract("", None);
        assert!(bag.is_empty());
        assert_eq!(bag, EntityBag::default());
    }

    #[test]
    fn test_fallback_yields_no_entities() {
        let extractor = EntityExtractor::new(Arc::new(NullAnnotator));
        assert!(extractor.extract("Apple opened in Madrid.", None).is_empty());
    }
}
