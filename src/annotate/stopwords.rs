//! Stop-word lists for the built-in annotator.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::analyze::Language;

/// Stop words for a language (lower-case).
pub fn stopwords(language: Language) -> &'static HashSet<&'static str> {
    match language {
        Language::Es => &SPANISH,
        Language::En => &ENGLISH,
    }
}

/// Whether a lower-cased word is a stop word in any supported language.
pub fn is_any_stopword(word: &str) -> bool {
    SPANISH.contains(word) || ENGLISH.contains(word)
}

static SPANISH: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "al", "algo", "algunos", "ante", "antes", "como", "con", "contra", "cual", "cuando",
        "de", "del", "desde", "donde", "durante", "e", "el", "ella", "ellos", "en", "entre", "era",
        "es", "esa", "ese", "eso", "esta", "está", "este", "esto", "estos", "fue", "fueron", "ha",
        "han", "hasta", "hay", "la", "las", "le", "les", "lo", "los", "más", "me", "mi", "muy",
        "ni", "no", "nos", "o", "otro", "otros", "para", "pero", "por", "porque", "que", "qué",
        "se", "ser", "si", "sí", "sin", "sobre", "son", "su", "sus", "también", "tras", "un",
        "una", "uno", "unos", "y", "ya",
    ]
    .iter()
    .copied()
    .collect()
});

static ENGLISH: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be",
        "been", "before", "being", "but", "by", "can", "could", "did", "do", "does", "for",
        "from", "had", "has", "have", "he", "her", "his", "i", "if", "in", "into", "is", "it",
        "its", "more", "most", "not", "of", "on", "or", "other", "our", "over", "she", "so",
        "some", "such", "than", "that", "the", "their", "them", "then", "there", "these", "they",
        "this", "those", "to", "under", "up", "was", "we", "were", "what", "when", "which",
        "while", "who", "will", "with", "would", "you",
    ]
    .iter()
    .copied()
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwords_by_language() {
        assert!(stopwords(Language::Es).contains("los"));
        assert!(!stopwords(Language::Es).contains("the"));
        assert!(stopwords(Language::En).contains("the"));
        assert!(is_any_stopword("el"));
        assert!(!is_any_stopword("apple"));
    }
}
