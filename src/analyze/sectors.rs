//! Sector/theme classification by keyword density.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::annotate::Annotator;
use crate::dictionary::{DictionaryStore, SectorDictionary};
use crate::error::{AnalysisError, Result};
use crate::text::round_to;

use super::context::MatchContext;
use super::{Language, LanguageDetector, SectorScore};

/// Decimals kept on sector scores.
pub const SECTOR_DECIMALS: i32 = 3;

/// Text length (in characters) at which the short-text discount stops applying.
const FULL_WEIGHT_CHARS: f64 = 100.0;

/// Ranks sectors/themes by dictionary keyword density.
pub struct SectorClassifier {
    store: Arc<DictionaryStore>,
    annotator: Arc<dyn Annotator>,
    detector: LanguageDetector,
    filename: String,
}

impl SectorClassifier {
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

    /// Classify `text` into at most `top_n` sectors.
    ///
    /// Each matching sector scores
    /// `matches / keyword_count * min(chars / 100, 1)`; results are ordered
    /// by score descending, then by name ascending, and rounded to three
    /// decimals. `top_n == 0` is rejected.
    pub fn classify(
        &self,
        text: &str,
        language: Option<Language>,
        top_n: usize,
    ) -> Result<Vec<SectorScore>> {
        if top_n == 0 {
            return Err(AnalysisError::InvalidArgument(
                "top_n must be at least 1".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let language = language.unwrap_or_else(|| self.detector.detect(text));
        let dict = self.store.load::<SectorDictionary>(&self.filename);
        let ctx = MatchContext::build(self.annotator.as_ref(), text, language);
        let length_factor = (text.chars().count() as f64 / FULL_WEIGHT_CHARS).min(1.0);

        let mut candidates: Vec<(&str, f64)> = dict
            .sectors_for(language)
            .filter_map(|(name, keywords)| {
                let matches = ctx.count(keywords);
                if matches == 0 {
                    return None;
                }
                let density = matches as f64 / keywords.len().max(1) as f64;
                Some((name, density * length_factor))
            })
            .collect();

        candidates.sort_by(|a, b| rank(a, b));

        Ok(candidates
            .into_iter()
            .take(top_n)
            .map(|(name, score)| SectorScore {
                sector: name.to_string(),
                score: round_to(score, SECTOR_DECIMALS),
            })
            .collect())
    }

    /// The top-ranked sector, or `None` if nothing matched.
    pub fn primary_sector(&self, text: &str, language: Option<Language>) -> Option<String> {
        self.classify(text, language, 1)
            .ok()
            .and_then(|scores| scores.into_iter().next())
            .map(|s| s.sector)
    }
}

/// Score descending, then name ascending.
fn rank(a: &(&str, f64), b: &(&str, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}
