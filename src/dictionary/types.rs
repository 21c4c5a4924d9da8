//! Typed dictionary schemas.
//!
//! Dictionaries are JSON documents with a `version` field and per-category,
//! per-language term lists:
//!
//! ```json
//! {
//!   "version": "1.2",
//!   "positive": { "es": ["crecimiento"], "en": ["growth"] },
//!   "negative": { "es": ["caída"], "en": ["loss"] },
//!   "neutral":  { "es": ["estable"], "en": ["stable"] }
//! }
//! ```
//!
//! Sector dictionaries nest one more level: `{"version": .., "sectors": {name: {lang: [..]}}}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::analyze::Language;

/// Version string carried by the shaped defaults.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Per-language term lists: `{"es": [...], "en": [...]}`.
pub type TermsByLanguage = HashMap<String, Vec<String>>;

/// A dictionary kind that the store knows how to parse, normalize and default.
pub trait DictionaryKind: DeserializeOwned + Send + Sync + Sized + 'static {
    /// Short name used in log messages.
    const KIND: &'static str;

    /// The empty-shaped default used when the file is missing or malformed.
    fn shaped_default() -> Self;

    /// Declared version string.
    fn version(&self) -> &str;

    /// Canonicalize term lists after parsing.
    fn normalize(&mut self);
}

/// Sentiment dictionary: positive/negative/neutral terms per language.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SentimentDictionary {
    #[serde(default = "default_version")]
    pub version: String,
    pub positive: TermsByLanguage,
    pub negative: TermsByLanguage,
    pub neutral: TermsByLanguage,
}

impl SentimentDictionary {
    /// Terms for one category, or an empty slice if the language is absent.
    pub fn terms(&self, category: SentimentCategory, language: Language) -> &[String] {
        let map = match category {
            SentimentCategory::Positive => &self.positive,
            SentimentCategory::Negative => &self.negative,
            SentimentCategory::Neutral => &self.neutral,
        };
        map.get(language.code()).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl DictionaryKind for SentimentDictionary {
    const KIND: &'static str = "sentiment";

    fn shaped_default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            positive: empty_terms(),
            negative: empty_terms(),
            neutral: empty_terms(),
        }
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn normalize(&mut self) {
        for map in [&mut self.positive, &mut self.negative, &mut self.neutral] {
            normalize_terms(map);
        }
    }
}

/// The three sentiment categories, in label tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

impl SentimentCategory {
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Positive,
        SentimentCategory::Negative,
        SentimentCategory::Neutral,
    ];
}

/// Sector/theme dictionary: sector name to per-language keyword lists.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SectorDictionary {
    #[serde(default = "default_version")]
    pub version: String,
    /// Ordered by name so classification iterates deterministically.
    pub sectors: BTreeMap<String, TermsByLanguage>,
}

impl SectorDictionary {
    /// Iterate `(sector, keywords)` for a language, skipping sectors with no keywords in it.
    pub fn sectors_for(&self, language: Language) -> impl Iterator<Item = (&str, &[String])> {
        self.sectors.iter().filter_map(move |(name, terms)| {
            terms
                .get(language.code())
                .filter(|list| !list.is_empty())
                .map(|list| (name.as_str(), list.as_slice()))
        })
    }
}

impl DictionaryKind for SectorDictionary {
    const KIND: &'static str = "sector";

    fn shaped_default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            sectors: BTreeMap::new(),
        }
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn normalize(&mut self) {
        for terms in self.sectors.values_mut() {
            normalize_terms(terms);
        }
    }
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn empty_terms() -> TermsByLanguage {
    Language::ALL
        .iter()
        .map(|lang| (lang.code().to_string(), Vec::new()))
        .collect()
}

/// Trim and lower-case terms, drop empties and duplicates (first occurrence wins).
fn normalize_terms(map: &mut TermsByLanguage) {
    for list in map.values_mut() {
        let mut seen = HashSet::new();
        let cleaned: Vec<String> = list
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();
        *list = cleaned;
    }
}
