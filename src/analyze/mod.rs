//! The deterministic analysis pipeline.
//!
//! Every component is a pure function of (text, language, loaded
//! dictionaries). Components share a [`DictionaryStore`](crate::dictionary::DictionaryStore)
//! and an [`Annotator`](crate::annotate::Annotator) through `Arc` handles
//! built once at startup; none of them keeps per-call state.
//!
//! - [`LanguageDetector`]: Spanish/English by marker overlap
//! - [`SentimentScorer`]: positive/negative/neutral shares
//! - [`SectorClassifier`]: ranked sector/theme densities
//! - [`EntityExtractor`]: entity categories and ticker symbols
//! - [`KeywordExtractor`]: frequency-ranked lemmas
//! - [`Summarizer`]: extractive summaries
//! - [`LocalAnalyzer`]: everything above in one call

mod context;
mod entities;
mod facade;
mod keywords;
mod language;
mod sectors;
mod sentiment;
mod summary;
mod tickers;
mod types;

pub use context::MatchContext;
pub use entities::{bag_from_spans, EntityExtractor};
pub use facade::{AnalyzerSettings, LocalAnalyzer, Readiness};
pub use keywords::{rank_keywords, KeywordExtractor};
pub use language::{Language, LanguageDetector};
pub use sectors::{SectorClassifier, SECTOR_DECIMALS};
pub use sentiment::{score_counts, SentimentScorer, SENTIMENT_DECIMALS};
pub use summary::{score_sentence, select_sentences, Summarizer, SummaryOptions};
pub use tickers::extract_tickers;
pub use types::{
    AnalysisResult, EntityBag, EntityCategory, ItemSummary, NewsItem, SectorScore,
    SentimentLabel, SentimentResult,
};
