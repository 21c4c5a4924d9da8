//! Language detection by fixed marker-list overlap.

use serde::{Deserialize, Serialize};

/// Supported languages. Spanish is the primary language and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Es, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Es
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" | "spanish" | "español" => Ok(Language::Es),
            "en" | "english" => Ok(Language::En),
            _ => Err(format!("unsupported language: {}", s)),
        }
    }
}

/// Spanish markers. Entries with spaces match whole words only.
const SPANISH_MARKERS: &[&str] = &[
    " el ", " la ", " los ", " las ", " de ", " del ", " que ", " y ", " en ", " un ", " una ",
    " por ", " con ", " para ", " es ", " se ", " su ", " al ", " más ", " pero ", "ción", "ñ",
    "á", "é", "í", "ó", "ú",
];

/// English markers.
const ENGLISH_MARKERS: &[&str] = &[
    " the ", " and ", " of ", " to ", " in ", " is ", " for ", " with ", " that ", " on ",
    " was ", " are ", " has ", " by ", " from ", " this ", " its ", " will ", " be ", "tion",
];

/// Classifies text as Spanish or English.
#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect the language of `text`.
    ///
    /// Counts how many markers of each list occur in the lower-cased text.
    /// Spanish wins only with a strictly greater count; ties (including
    /// 0-0) go to English. Empty text is Spanish.
    pub fn detect(&self, text: &str) -> Language {
        if text.trim().is_empty() {
            return Language::Es;
        }

        let (es, en) = Self::marker_counts(text);
        if es > en {
            Language::Es
        } else {
            Language::En
        }
    }

    /// `(spanish, english)` marker counts, for diagnostics.
    pub fn marker_counts(text: &str) -> (usize, usize) {
        // Padding lets space-delimited markers match at the text edges.
        let lowered = format!(" {} ", text.to_lowercase());
        let count = |markers: &[&str]| markers.iter().filter(|m| lowered.contains(*m)).count();
        (count(SPANISH_MARKERS), count(ENGLISH_MARKERS))
    }
}
