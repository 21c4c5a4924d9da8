//! Extractive summarization by sentence information density.
//!
//! Sentences are scored by the entities, keywords, numbers and length they
//! carry, picked greedily by score, then put back in reading order.

use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::text::{split_sentences, truncate_with_ellipsis, Sentence};

use super::{ItemSummary, LocalAnalyzer, NewsItem};

lazy_static! {
    /// A number with an optional unit suffix ("3.5%", "200 millones", "5bn").
    static ref NUMBER_PATTERN: Regex = Regex::new(
        r"\d+(?:[.,]\d+)*\s*(?:%|percent|por ciento|millones|million|billion|bn|mil\b|[kKmMbB]\b)?"
    ).unwrap();
}

/// Sentences shorter than this (in characters) are never selected.
const MIN_SENTENCE_CHARS: usize = 10;

/// Characters kept when no sentence qualifies.
const FALLBACK_CHARS: usize = 200;

/// Smallest remaining batch budget worth spending on a truncated summary.
const MIN_TRUNCATED_BUDGET: usize = 50;

const ENTITY_WEIGHT: f64 = 2.0;
const KEYWORD_WEIGHT: f64 = 1.0;
const NUMBER_WEIGHT: f64 = 0.5;

/// Summary size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub max_sentences: usize,
    pub max_chars: Option<usize>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_sentences: 3,
            max_chars: None,
        }
    }
}

/// Builds extractive summaries using signals from a [`LocalAnalyzer`].
pub struct Summarizer {
    analyzer: Arc<LocalAnalyzer>,
}

impl Summarizer {
    pub fn new(analyzer: Arc<LocalAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Summarize `text`. The title, when given, feeds entity and keyword
    /// extraction but is never part of the summary itself.
    pub fn summarize(&self, text: &str, title: Option<&str>, options: SummaryOptions) -> Result<String> {
        if options.max_sentences == 0 {
            return Err(AnalysisError::InvalidArgument(
                "max_sentences must be at least 1".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let input = match title {
            Some(t) if !t.trim().is_empty() => format!("{} {}", t, text),
            _ => text.to_string(),
        };
        let analysis = self.analyzer.analyze(&input, None)?;
        let entities: Vec<String> = analysis.entities.iter_all().cloned().collect();

        Ok(select_sentences(text, &entities, &analysis.keywords, options))
    }

    /// Summarize a batch of items under an optional total character budget.
    ///
    /// When a summary would overrun the remaining budget it is truncated if
    /// at least 50 characters remain; otherwise the batch stops there.
    pub fn summarize_batch(
        &self,
        items: &[NewsItem],
        options: SummaryOptions,
        budget: Option<usize>,
    ) -> Result<Vec<ItemSummary>> {
        let summaries: Vec<String> = items
            .par_iter()
            .map(|item| self.summarize(&item.body, item.title.as_deref(), options))
            .collect::<Result<Vec<_>>>()?;

        Ok(apply_budget(items, summaries, budget))
    }
}

/// Walk summaries in order, spending the budget.
fn apply_budget(items: &[NewsItem], summaries: Vec<String>, budget: Option<usize>) -> Vec<ItemSummary> {
    let mut remaining = budget;
    let mut out = Vec::with_capacity(items.len());

    for (item, summary) in items.iter().zip(summaries) {
        let len = summary.chars().count();
        match remaining {
            None => out.push(ItemSummary {
                id: item.id.clone(),
                summary,
                truncated: false,
            }),
            Some(left) if len <= left => {
                remaining = Some(left - len);
                out.push(ItemSummary {
                    id: item.id.clone(),
                    summary,
                    truncated: false,
                });
            }
            Some(left) if left >= MIN_TRUNCATED_BUDGET => {
                remaining = Some(0);
                out.push(ItemSummary {
                    id: item.id.clone(),
                    summary: truncate_with_ellipsis(&summary, left),
                    truncated: true,
                });
            }
            Some(left) => {
                debug!(id = %item.id, remaining = left, "batch budget exhausted");
                break;
            }
        }
    }

    out
}

/// Pick the densest sentences of `text` and return them in reading order.
pub fn select_sentences(
    text: &str,
    entities: &[String],
    keywords: &[String],
    options: SummaryOptions,
) -> String {
    let sentences: Vec<Sentence> = split_sentences(text)
        .into_iter()
        .filter(|s| s.text.chars().count() >= MIN_SENTENCE_CHARS)
        .collect();

    if sentences.is_empty() {
        return fallback_summary(text);
    }

    let entities = lowercase_distinct(entities);
    let keywords = lowercase_distinct(keywords);
    let scores: Vec<f64> = sentences
        .iter()
        .map(|s| score_sentence(&s.text, &entities, &keywords))
        .collect();

    let mut ranked: Vec<usize> = (0..sentences.len()).collect();
    // Stable: equal scores keep their original relative order.
    ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut selected: Vec<&Sentence> = Vec::new();
    let mut used = 0;
    for idx in ranked.iter().copied() {
        if selected.len() >= options.max_sentences {
            break;
        }
        let sentence = &sentences[idx];
        let len = sentence.text.chars().count();
        let added = if selected.is_empty() { len } else { len + 1 };
        if let Some(max) = options.max_chars {
            if used + added > max {
                break;
            }
        }
        used += added;
        selected.push(sentence);
    }

    if selected.is_empty() {
        // Even the best sentence exceeds max_chars: cut it down.
        let best = &sentences[ranked[0]];
        return truncate_with_ellipsis(&best.text, options.max_chars.unwrap_or(usize::MAX));
    }

    selected.sort_by_key(|s| s.offset);
    selected
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Density score of one sentence.
pub fn score_sentence(sentence: &str, entities: &[String], keywords: &[String]) -> f64 {
    let lower = sentence.to_lowercase();
    let entity_hits = entities.iter().filter(|e| lower.contains(e.as_str())).count();
    let keyword_hits = keywords.iter().filter(|k| lower.contains(k.as_str())).count();
    let numbers = NUMBER_PATTERN.find_iter(sentence).count();

    entity_hits as f64 * ENTITY_WEIGHT
        + keyword_hits as f64 * KEYWORD_WEIGHT
        + length_bonus(sentence.chars().count())
        + numbers as f64 * NUMBER_WEIGHT
}

fn length_bonus(chars: usize) -> f64 {
    match chars {
        50..=150 => 1.0,
        20..=49 | 151..=250 => 0.5,
        _ => 0.1,
    }
}

fn lowercase_distinct(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|v| v.to_lowercase())
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}

fn fallback_summary(text: &str) -> String {
    let head: String = text.chars().take(FALLBACK_CHARS).collect();
    if text.chars().count() > FALLBACK_CHARS {
        format!("{}...", head)
    } else {
        head
    }
}
