//! One-call analysis combining every component.

use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::annotate::{Annotator, LexiconAnnotator};
use crate::config::Config;
use crate::dictionary::{
    DictionaryStore, SectorDictionary, SentimentDictionary, SECTOR_DICTIONARY, SENTIMENT_DICTIONARY,
};
use crate::error::{AnalysisError, Result};
use crate::text::round_to;

use super::sectors::SECTOR_DECIMALS;
use super::{
    AnalysisResult, EntityExtractor, KeywordExtractor, Language, LanguageDetector,
    SectorClassifier, SentimentScorer,
};

/// Limits and dictionary names used by [`LocalAnalyzer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerSettings {
    pub top_n: usize,
    pub max_keywords: usize,
    pub sentiment_dictionary: String,
    pub sector_dictionary: String,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            top_n: 3,
            max_keywords: 10,
            sentiment_dictionary: SENTIMENT_DICTIONARY.to_string(),
            sector_dictionary: SECTOR_DICTIONARY.to_string(),
        }
    }
}

/// What the analyzer can currently do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readiness {
    pub annotator: String,
    /// Languages the annotator has models for.
    pub languages: Vec<Language>,
    pub sentiment_version: Option<String>,
    pub sector_version: Option<String>,
}

impl Readiness {
    /// Ready when the annotator covers every supported language. Missing
    /// dictionaries degrade results but do not make the analyzer unready.
    pub fn is_ready(&self) -> bool {
        Language::ALL.iter().all(|l| self.languages.contains(l))
    }
}

/// Runs language detection, sentiment, sectors, entities, tickers and
/// keywords over a text in one call.
pub struct LocalAnalyzer {
    store: Arc<DictionaryStore>,
    annotator: Arc<dyn Annotator>,
    settings: AnalyzerSettings,
    detector: LanguageDetector,
    sentiment: SentimentScorer,
    sectors: SectorClassifier,
    entities: EntityExtractor,
    keywords: KeywordExtractor,
}

impl LocalAnalyzer {
    /// Build an analyzer over shared store and annotator handles.
    pub fn new(
        store: Arc<DictionaryStore>,
        annotator: Arc<dyn Annotator>,
        settings: AnalyzerSettings,
    ) -> Result<Self> {
        if settings.top_n == 0 {
            return Err(AnalysisError::InvalidArgument(
                "top_n must be at least 1".to_string(),
            ));
        }
        if settings.max_keywords == 0 {
            return Err(AnalysisError::InvalidArgument(
                "max_keywords must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            sentiment: SentimentScorer::new(
                Arc::clone(&store),
                Arc::clone(&annotator),
                settings.sentiment_dictionary.clone(),
            ),
            sectors: SectorClassifier::new(
                Arc::clone(&store),
                Arc::clone(&annotator),
                settings.sector_dictionary.clone(),
            ),
            entities: EntityExtractor::new(Arc::clone(&annotator)),
            keywords: KeywordExtractor::new(Arc::clone(&annotator)),
            detector: LanguageDetector::new(),
            store,
            annotator,
            settings,
        })
    }

    /// Build an analyzer with the built-in annotator and the dictionaries
    /// named by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(DictionaryStore::new(config.dictionary_dir()));
        Self::new(store, Arc::new(LexiconAnnotator::new()), config.analyzer_settings())
    }

    /// Analyze one text. The language is detected once and shared by all
    /// components.
    pub fn analyze(&self, text: &str, language: Option<Language>) -> Result<AnalysisResult> {
        let language = language.unwrap_or_else(|| self.detector.detect(text));

        let sentiment = self.sentiment.analyze(text, Some(language));
        let sectors = self
            .sectors
            .classify(text, Some(language), self.settings.top_n)?;
        let primary_sector = sectors.first().map(|s| s.sector.clone());

        let result = AnalysisResult {
            language,
            confidence: round_to(sentiment.dominant_score(), SECTOR_DECIMALS),
            sentiment,
            sectors,
            primary_sector,
            entities: self.entities.extract(text, Some(language)),
            tickers: self.entities.tickers(text),
            keywords: self
                .keywords
                .extract(text, Some(language), self.settings.max_keywords)?,
        };
        debug!(
            language = language.code(),
            label = %result.sentiment.label,
            sectors = result.sectors.len(),
            entities = result.entities.len(),
            "analysis complete"
        );
        Ok(result)
    }

    /// Analyze texts in parallel; results keep input order.
    pub fn analyze_batch<S>(&self, texts: &[S], language: Option<Language>) -> Result<Vec<AnalysisResult>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|t| self.analyze(t.as_ref(), language))
            .collect()
    }

    /// Force both dictionaries to be read again from disk.
    pub fn reload_dictionaries(&self) {
        self.store
            .reload::<SentimentDictionary>(&self.settings.sentiment_dictionary);
        self.store
            .reload::<SectorDictionary>(&self.settings.sector_dictionary);
        info!(dir = %self.store.dir().display(), "dictionaries reloaded");
    }

    pub fn readiness(&self) -> Readiness {
        Readiness {
            annotator: self.annotator.name().to_string(),
            languages: Language::ALL
                .into_iter()
                .filter(|l| self.annotator.supports(*l))
                .collect(),
            sentiment_version: self
                .store
                .version::<SentimentDictionary>(&self.settings.sentiment_dictionary),
            sector_version: self
                .store
                .version::<SectorDictionary>(&self.settings.sector_dictionary),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.readiness().is_ready()
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<DictionaryStore> {
        &self.store
    }

    pub fn sentiment(&self) -> &SentimentScorer {
        &self.sentiment
    }

    pub fn sectors(&self) -> &SectorClassifier {
        &self.sectors
    }

    pub fn entities(&self) -> &EntityExtractor {
        &self.entities
    }

    pub fn keywords(&self) -> &KeywordExtractor {
        &self.keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{EntityBag, SentimentLabel, SentimentResult};
    use crate::annotate::NullAnnotator;
    use tempfile::TempDir;

    const SENTIMENT: &str = r#"{
        "version": "s-1",
        "positive": {"es": ["crecimiento", "récord"], "en": ["growth", "record"]},
        "negative": {"es": ["caída"], "en": ["loss"]},
        "neutral": {"es": [], "en": []}
    }"#;

    const SECTORS: &str = r#"{
        "version": "x-1",
        "sectors": {
            "Tecnología": {"es": ["apple", "tecnología"], "en": ["apple", "technology"]}
        }
    }"#;

    fn analyzer(annotator: Arc<dyn Annotator>) -> (TempDir, LocalAnalyzer) {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(SENTIMENT_DICTIONARY), SENTIMENT).unwrap();
        std::fs::write(temp.path().join(SECTOR_DICTIONARY), SECTORS).unwrap();
        let store = Arc::new(DictionaryStore::new(temp.path()));
        let analyzer = LocalAnalyzer::new(store, annotator, AnalyzerSettings::default()).unwrap();
        (temp, analyzer)
    }

    #[test]
    fn test_empty_text_result() {
        let (_temp, a) = analyzer(Arc::new(LexiconAnnotator::new()));
        let result = a.analyze("", None).unwrap();
        assert_eq!(result.language, Language::Es);
        assert_eq!(result.sentiment, SentimentResult::neutral());
        assert_eq!(result.confidence, 1.0);
        assert!(result.sectors.is_empty());
        assert_eq!(result.primary_sector, None);
        assert_eq!(result.entities, EntityBag::default());
        assert!(result.tickers.is_empty());
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn test_combined_result() {
        let (_temp, a) = analyzer(Arc::new(LexiconAnnotator::new()));
        let text = "Apple anunció un crecimiento récord en sus ventas de tecnología \
                    y las acciones de AAPL subieron con fuerza en la bolsa de Nueva York.";
        let result = a.analyze(text, None).unwrap();
        assert_eq!(result.language, Language::Es);
        assert_eq!(result.sentiment.label, SentimentLabel::Positive);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.primary_sector.as_deref(), Some("Tecnología"));
        assert!(result.tickers.contains(&"AAPL".to_string()));
        assert!(result.entities.organizations.contains(&"Apple".to_string()));
    }

    #[test]
    fn test_batch_keeps_order() {
        let (_temp, a) = analyzer(Arc::new(LexiconAnnotator::new()));
        let texts = vec![
            "Apple reported record growth.".to_string(),
            String::new(),
            "La caída fue fuerte.".to_string(),
        ];
        let results = a.analyze_batch(&texts, None).unwrap();
        assert_eq!(results.len(), 3);
        for (text, result) in texts.iter().zip(&results) {
            assert_eq!(&a.analyze(text, None).unwrap(), result);
        }
    }

    #[test]
    fn test_zero_limits_rejected() {
        let store = Arc::new(DictionaryStore::new("missing"));
        let settings = AnalyzerSettings {
            top_n: 0,
            ..Default::default()
        };
        assert!(LocalAnalyzer::new(store, Arc::new(NullAnnotator), settings).is_err());
    }

    #[test]
    fn test_readiness() {
        let (_temp, a) = analyzer(Arc::new(LexiconAnnotator::new()));
        assert!(a.is_ready());
        let readiness = a.readiness();
        assert_eq!(readiness.sentiment_version.as_deref(), Some("s-1"));
        assert_eq!(readiness.sector_version.as_deref(), Some("x-1"));

        let (_temp, a) = analyzer(Arc::new(NullAnnotator));
        assert!(!a.is_ready());
        // Still usable through the fallback path.
        assert!(a.analyze("Apple crecimiento", None).is_ok());
    }
}
