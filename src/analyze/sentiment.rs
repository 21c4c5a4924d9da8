//! Dictionary-overlap sentiment scoring.

use std::sync::Arc;
use tracing::debug;

use crate::annotate::Annotator;
use crate::dictionary::{DictionaryStore, SentimentCategory, SentimentDictionary};
use crate::text::round_to;

use super::context::MatchContext;
use super::{Language, LanguageDetector, SentimentLabel, SentimentResult};

/// Decimals kept on sentiment scores.
pub const SENTIMENT_DECIMALS: i32 = 6;

/// Scores positive/negative/neutral sentiment from dictionary matches.
pub struct SentimentScorer {
    store: Arc<DictionaryStore>,
    annotator: Arc<dyn Annotator>,
    detector: LanguageDetector,
    filename: String,
}

impl SentimentScorer {
    pub fn new(
        store: Arc<DictionaryStore>,
        annotator: Arc<dyn Annotator>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            store,
            annotator,
            detector: LanguageDetector::new(),
            filename: filename.into(),
        }
    }

    /// Score `text`. The language is detected when not given.
    ///
    /// Empty or whitespace-only text returns the neutral result without
    /// touching the annotator or the dictionary.
    pub fn analyze(&self, text: &str, language: Option<Language>) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::neutral();
        }

        let language = language.unwrap_or_else(|| self.detector.detect(text));
        let dict = self.store.load::<SentimentDictionary>(&self.filename);
        let ctx = MatchContext::build(self.annotator.as_ref(), text, language);

        let counts = SentimentCategory::ALL.map(|c| ctx.count(dict.terms(c, language)));
        debug!(
            language = language.code(),
            positive = counts[0],
            negative = counts[1],
            neutral = counts[2],
            "sentiment matches"
        );
        score_counts(counts)
    }
}

/// Turn `[positive, negative, neutral]` match counts into normalized scores.
///
/// Scores are count shares, renormalized to sum to 1.0 and rounded to six
/// decimals. The label is the highest score; ties go to the earlier of
/// positive, negative, neutral.
pub fn score_counts(counts: [usize; 3]) -> SentimentResult {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return SentimentResult::neutral();
    }

    let shares = counts.map(|c| c as f64 / total as f64);
    let sum: f64 = shares.iter().sum();
    let [positive, negative, neutral] = shares.map(|s| round_to(s / sum, SENTIMENT_DECIMALS));

    let mut label = SentimentLabel::Positive;
    let mut best = positive;
    for (candidate, score) in [
        (SentimentLabel::Negative, negative),
        (SentimentLabel::Neutral, neutral),
    ] {
        if score > best {
            label = candidate;
            best = score;
        }
    }

    SentimentResult {
        positive,
        negative,
        neutral,
        label,
    }
}
