//! Integration tests for the full analysis pipeline.
//!
//! These tests run the facade against the fixture dictionaries in
//! testdata/ with the built-in rule-based annotator.

use std::path::PathBuf;
use std::sync::Arc;

use newslens::analyze::{
    AnalysisResult, AnalyzerSettings, EntityBag, Language, LocalAnalyzer, SectorScore,
    SentimentLabel, SentimentResult,
};
use newslens::annotate::{LexiconAnnotator, NullAnnotator};
use newslens::dictionary::DictionaryStore;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn article(name: &str) -> String {
    std::fs::read_to_string(testdata_path().join("articles").join(name))
        .expect("should read article fixture")
}

fn analyzer() -> LocalAnalyzer {
    let store = Arc::new(DictionaryStore::new(testdata_path().join("dictionaries")));
    LocalAnalyzer::new(store, Arc::new(LexiconAnnotator::new()), AnalyzerSettings::default())
        .expect("default settings are valid")
}

fn sector(name: &str, score: f64) -> SectorScore {
    SectorScore {
        sector: name.to_string(),
        score,
    }
}

#[test]
fn test_spanish_apple_article() {
    let result = analyzer().analyze(&article("apple_es.txt"), None).unwrap();

    assert_eq!(result.language, Language::Es);
    assert_eq!(
        result.sentiment,
        SentimentResult {
            positive: 0.8,
            negative: 0.0,
            neutral: 0.2,
            label: SentimentLabel::Positive,
        }
    );
    assert_eq!(result.confidence, 0.8);
    assert_eq!(
        result.sectors,
        vec![sector("Tecnología", 0.6), sector("Finanzas", 0.5)]
    );
    assert_eq!(result.primary_sector.as_deref(), Some("Tecnología"));
    assert_eq!(result.tickers, vec!["AAPL"]);
    assert!(result.entities.organizations.contains(&"Apple".to_string()));
    assert!(!result.keywords.is_empty());
    assert!(result.keywords.len() <= 10);
}

#[test]
fn test_english_article_sector_tie_orders_by_name() {
    let result = analyzer()
        .analyze(&article("microsoft_en.txt"), None)
        .unwrap();

    assert_eq!(result.language, Language::En);
    assert_eq!(result.sentiment.label, SentimentLabel::Positive);
    assert_eq!(result.sentiment.positive, 0.666667);
    assert_eq!(result.sentiment.neutral, 0.333333);
    assert_eq!(result.confidence, 0.667);
    assert_eq!(
        result.sectors,
        vec![sector("Finanzas", 0.25), sector("Tecnología", 0.25)]
    );
    assert_eq!(result.tickers, vec!["MSFT"]);
}

#[test]
fn test_forced_language_overrides_detection() {
    let text = article("apple_es.txt");
    let result = analyzer().analyze(&text, Some(Language::En)).unwrap();
    assert_eq!(result.language, Language::En);
    // Of the English Tecnología terms only "apple" and "iphone" occur.
    assert_eq!(result.primary_sector.as_deref(), Some("Tecnología"));
}

#[test]
fn test_empty_input_law() {
    let a = analyzer();
    for text in ["", "   ", "\n\t"] {
        let result = a.analyze(text, None).unwrap();
        assert_eq!(
            result,
            AnalysisResult {
                language: Language::Es,
                sentiment: SentimentResult::neutral(),
                confidence: 1.0,
                sectors: vec![],
                primary_sector: None,
                entities: EntityBag::default(),
                tickers: vec![],
                keywords: vec![],
            }
        );
    }
}

#[test]
fn test_sentiment_scores_sum_to_one() {
    let a = analyzer();
    for name in ["apple_es.txt", "microsoft_en.txt"] {
        let s = a.analyze(&article(name), None).unwrap().sentiment;
        let sum = s.positive + s.negative + s.neutral;
        assert!((sum - 1.0).abs() < 1e-6, "{} sums to {}", name, sum);
    }
}

#[test]
fn test_missing_dictionaries_degrade_to_no_match() {
    let store = Arc::new(DictionaryStore::new(testdata_path().join("no-such-dir")));
    let a = LocalAnalyzer::new(
        store,
        Arc::new(LexiconAnnotator::new()),
        AnalyzerSettings::default(),
    )
    .unwrap();

    let result = a.analyze(&article("apple_es.txt"), None).unwrap();
    assert_eq!(result.sentiment, SentimentResult::neutral());
    assert!(result.sectors.is_empty());
    // Dictionary-free signals still work.
    assert_eq!(result.tickers, vec!["AAPL"]);
    assert!(a.readiness().sentiment_version.is_none());
}

#[test]
fn test_malformed_dictionary_degrades_to_no_match() {
    let store = Arc::new(DictionaryStore::new(testdata_path().join("dictionaries")));
    let settings = AnalyzerSettings {
        sentiment_dictionary: "malformed.json".to_string(),
        ..Default::default()
    };
    let a = LocalAnalyzer::new(store, Arc::new(LexiconAnnotator::new()), settings).unwrap();

    let result = a.analyze(&article("apple_es.txt"), None).unwrap();
    assert_eq!(result.sentiment, SentimentResult::neutral());
    assert_eq!(result.primary_sector.as_deref(), Some("Tecnología"));
}

#[test]
fn test_annotator_without_models_falls_back() {
    let store = Arc::new(DictionaryStore::new(testdata_path().join("dictionaries")));
    let a = LocalAnalyzer::new(store, Arc::new(NullAnnotator), AnalyzerSettings::default())
        .unwrap();
    assert!(!a.is_ready());

    let result = a.analyze(&article("apple_es.txt"), None).unwrap();
    // Substring matching on the normalized text still finds every term.
    assert_eq!(result.sentiment.label, SentimentLabel::Positive);
    assert_eq!(result.primary_sector.as_deref(), Some("Tecnología"));
    assert!(result.entities.is_empty());
    assert!(result.keywords.is_empty());
}
