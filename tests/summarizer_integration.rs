//! Integration tests for extractive summarization.

use std::path::PathBuf;
use std::sync::Arc;

use newslens::analyze::{
    AnalyzerSettings, LocalAnalyzer, NewsItem, Summarizer, SummaryOptions,
};
use newslens::annotate::LexiconAnnotator;
use newslens::dictionary::DictionaryStore;
use newslens::error::AnalysisError;
use newslens::text::split_sentences;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn summarizer() -> Summarizer {
    let store = Arc::new(DictionaryStore::new(testdata_path().join("dictionaries")));
    let analyzer = LocalAnalyzer::new(
        store,
        Arc::new(LexiconAnnotator::new()),
        AnalyzerSettings::default(),
    )
    .expect("default settings are valid");
    Summarizer::new(Arc::new(analyzer))
}

const DENSEST: &str = "Apple ganó 90 millones de dólares en 2024, un 8% más, según Tim Cook en Madrid.";

fn five_sentences() -> String {
    [
        "El mercado abrió con calma esta mañana.",
        "Los inversores esperaban más noticias.",
        DENSEST,
        "Los analistas dijeron que los resultados fueron sólidos.",
        "La sesión terminó sin grandes cambios.",
    ]
    .join(" ")
}

fn options(max_sentences: usize) -> SummaryOptions {
    SummaryOptions {
        max_sentences,
        max_chars: None,
    }
}

#[test]
fn test_single_sentence_summary_is_densest_verbatim() {
    let summary = summarizer()
        .summarize(&five_sentences(), None, options(1))
        .unwrap();
    assert_eq!(summary, DENSEST);
}

#[test]
fn test_selected_sentences_follow_text_order() {
    let text = five_sentences();
    let summary = summarizer().summarize(&text, None, options(2)).unwrap();

    let picked = split_sentences(&summary);
    assert_eq!(picked.len(), 2);
    assert!(picked.iter().any(|s| s.text == DENSEST));

    let positions: Vec<usize> = picked
        .iter()
        .map(|s| text.find(&s.text).expect("summary sentences come from the text"))
        .collect();
    assert!(positions[0] < positions[1]);
}

#[test]
fn test_max_chars_bounds_summary() {
    let summary = summarizer()
        .summarize(
            &five_sentences(),
            None,
            SummaryOptions {
                max_sentences: 3,
                max_chars: Some(120),
            },
        )
        .unwrap();
    assert!(summary.chars().count() <= 120);
    assert!(summary.contains(DENSEST));
}

#[test]
fn test_title_feeds_analysis_but_not_summary() {
    let title = "Resultados de Apple";
    let summary = summarizer()
        .summarize(&five_sentences(), Some(title), options(1))
        .unwrap();
    assert_eq!(summary, DENSEST);
    assert!(!summary.contains(title));
}

#[test]
fn test_short_text_falls_back_to_prefix() {
    let s = summarizer();
    assert_eq!(s.summarize("Breve.", None, options(3)).unwrap(), "Breve.");
    assert_eq!(s.summarize("   ", None, options(3)).unwrap(), "");
}

#[test]
fn test_zero_sentences_rejected() {
    let err = summarizer()
        .summarize(&five_sentences(), None, options(0))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidArgument(_)));
}

fn items() -> Vec<NewsItem> {
    ["apple_es", "microsoft_en"]
        .iter()
        .map(|id| NewsItem {
            id: id.to_string(),
            title: None,
            body: std::fs::read_to_string(
                testdata_path().join("articles").join(format!("{}.txt", id)),
            )
            .expect("should read article fixture"),
        })
        .chain(std::iter::once(NewsItem {
            id: "sesion".to_string(),
            title: Some("Cierre de mercado".to_string()),
            body: five_sentences(),
        }))
        .collect()
}

#[test]
fn test_batch_without_budget_summarizes_everything() {
    let summaries = summarizer()
        .summarize_batch(&items(), options(1), None)
        .unwrap();
    let ids: Vec<_> = summaries.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["apple_es", "microsoft_en", "sesion"]);
    assert!(summaries.iter().all(|s| !s.truncated));
    assert_eq!(summaries[2].summary, DENSEST);
}

#[test]
fn test_batch_budget_is_never_exceeded() {
    let s = summarizer();
    let full = s.summarize_batch(&items(), options(1), None).unwrap();
    let first_len = full[0].summary.chars().count();

    // Room for the first summary plus 60 characters of the second.
    let budget = first_len + 60;
    let summaries = s.summarize_batch(&items(), options(1), Some(budget)).unwrap();

    assert_eq!(summaries.len(), 2);
    assert!(!summaries[0].truncated);
    assert!(summaries[1].truncated);
    assert!(summaries[1].summary.ends_with("..."));
    let used: usize = summaries.iter().map(|s| s.summary.chars().count()).sum();
    assert!(used <= budget);
}

#[test]
fn test_batch_stops_when_little_budget_remains() {
    let s = summarizer();
    let full = s.summarize_batch(&items(), options(1), None).unwrap();
    let budget = full[0].summary.chars().count() + 20;

    let summaries = s.summarize_batch(&items(), options(1), Some(budget)).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0], full[0]);
}
