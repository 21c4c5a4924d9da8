//! Candidate ticker symbol extraction.

use lazy_static::lazy_static;
use phf::phf_set;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// Bare uppercase run, optionally with an exchange suffix (`SAN.MC`).
    static ref BARE_TICKER: Regex = Regex::new(r"\b[A-Z]{1,5}(?:\.[A-Z]{2,4})?\b").unwrap();

    /// Uppercase run followed by a stock indicator word (indicator matched case-insensitively).
    static ref INDICATED_TICKER: Regex = Regex::new(
        r"\b([A-Z]{2,5})\s+(?i:stock|stocks|shares|equity|acciones|acción|títulos|valores)\b"
    ).unwrap();
}

/// Longest accepted symbol, suffix included.
const MAX_TICKER_LEN: usize = 6;

/// Common short words that look like tickers when written in capitals.
static TICKER_STOPLIST: phf::Set<&'static str> = phf_set! {
    "A", "I", "AN", "AND", "ARE", "AS", "AT", "BE", "BUT", "BY", "CAN", "DO", "FOR", "FROM",
    "HAS", "HAD", "HE", "IF", "IN", "IS", "IT", "ITS", "MY", "NEW", "NO", "NOT", "NOW", "OF",
    "ON", "OR", "OUR", "OUT", "SO", "THE", "TO", "UP", "US", "WAS", "WE", "WHO", "WILL", "YOU",
    "CEO", "CFO", "CTO", "USA", "UK", "EU", "GDP", "IPO", "ETF", "AI",
};

/// Extract candidate ticker symbols from raw `text`, in first-seen order.
pub fn extract_tickers(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let bare = BARE_TICKER.find_iter(text).map(|m| m.as_str());
    let indicated = INDICATED_TICKER
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str());

    let mut seen = HashSet::new();
    bare.chain(indicated)
        .map(str::to_uppercase)
        .filter(|t| !t.is_empty() && t.chars().count() <= MAX_TICKER_LEN)
        .filter(|t| !TICKER_STOPLIST.contains(t.as_str()))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_and_suffixed() {
        let tickers = extract_tickers("Buy AAPL and SAN.MC today, skip Apple.");
        assert_eq!(tickers, vec!["AAPL", "SAN.MC"]);
    }

    #[test]
    fn test_stoplist_excludes_common_words() {
        let tickers = extract_tickers("THE market AND the TSLA rally");
        assert_eq!(tickers, vec!["TSLA"]);
    }

    #[test]
    fn test_long_symbols_discarded() {
        // Nine characters with the suffix.
        assert!(extract_tickers("AMZN.NASD").is_empty());
        assert_eq!(extract_tickers("AMZN.NASD and MSFT"), vec!["MSFT"]);
    }

    #[test]
    fn test_indicator_words_dedup() {
        let tickers = extract_tickers("NVDA shares rose; NVDA Stock and IBM acciones");
        assert_eq!(tickers, vec!["NVDA", "IBM"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_tickers("").is_empty());
        assert!(extract_tickers("no capitals here").is_empty());
    }
}
