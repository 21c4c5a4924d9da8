//! Keyword dictionaries for sentiment and sector classification.

mod store;
mod types;

pub use store::{read_dictionary, DictionaryStore, LoadOutcome, Origin};
pub use types::{
    DictionaryKind, SectorDictionary, SentimentCategory, SentimentDictionary, TermsByLanguage,
    DEFAULT_VERSION,
};

/// Default filename of the sentiment dictionary.
pub const SENTIMENT_DICTIONARY: &str = "sentiment_dictionary.json";

/// Default filename of the sector/theme dictionary.
pub const SECTOR_DICTIONARY: &str = "sector_dictionary.json";
