//! Newslens - deterministic rule-based news text analysis.
//!
//! Newslens turns raw news text into structured signals: sentiment,
//! sector/theme classification, named entities, ticker symbols, keywords
//! and extractive summaries. Everything is a dictionary lookup or a fixed
//! rule, so identical input always yields identical output.
//!
//! # Architecture
//!
//! - `annotate`: linguistic annotation seam (`Annotator`) and the built-in
//!   rule-based provider
//! - `dictionary`: typed keyword dictionaries and the caching store
//! - `analyze`: detector, scorers, extractors, summarizer and the facade
//! - `config`: YAML configuration schema
//! - `report`: output formatting (text, JSON)
//!
//! # Example
//!
//! ```no_run
//! use newslens::{Config, LocalAnalyzer};
//!
//! let analyzer = LocalAnalyzer::from_config(&Config::default()).unwrap();
//! let result = analyzer.analyze("Apple anunció un crecimiento récord.", None).unwrap();
//! println!("{} {:?}", result.sentiment.label, result.primary_sector);
//! ```

pub mod analyze;
pub mod annotate;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod report;
pub mod text;

pub use analyze::{
    AnalysisResult, AnalyzerSettings, EntityBag, Language, LanguageDetector, LocalAnalyzer,
    NewsItem, Summarizer, SummaryOptions,
};
pub use annotate::{Annotator, LexiconAnnotator, NullAnnotator};
pub use config::Config;
pub use dictionary::{DictionaryStore, SectorDictionary, SentimentDictionary};
pub use error::{AnalysisError, AnnotateError, DictionaryError};
