//! Rule-based named-entity spans for the built-in annotator.
//!
//! Monetary amounts and dates come from regexes. Organizations, places and
//! people come from runs of capitalized words classified against small
//! gazetteers. Labels follow the usual NER conventions: `ORG`, `PERSON`,
//! `GPE`, `LOC`, `MONEY`, `DATE` and `MISC` for anything unclassified.

use lazy_static::lazy_static;
use phf::phf_set;
use regex::Regex;

use super::stopwords::is_any_stopword;
use super::traits::EntitySpan;

lazy_static! {
    static ref MONEY_PATTERN: Regex = Regex::new(
        r"(?i)(?:[$€£]\s?\d+(?:[.,]\d+)*(?:\s?(?:mil millones|millones|billones|billion|million|thousand|bn|mn|[kmb]\b))?|\d+(?:[.,]\d+)*\s?(?:(?:mil millones|millones|billones|billion|million)\s+(?:de\s+)?)?(?:dólares|dolares|euros|dollars|usd|eur|libras|pounds)\b)"
    ).unwrap();

    static ref MONTH_DATE_PATTERN: Regex = Regex::new(
        r"\b(?:\d{1,2}\s+(?:de\s+)?)?(?:January|February|March|April|May|June|July|August|September|October|November|December|[Ee]nero|[Ff]ebrero|[Mm]arzo|[Aa]bril|[Mm]ayo|[Jj]unio|[Jj]ulio|[Aa]gosto|[Ss]eptiembre|[Oo]ctubre|[Nn]oviembre|[Dd]iciembre)(?:\s+\d{1,2}(?:,\s*\d{4})?|\s+(?:de\s+|del\s+)?\d{4})?\b"
    ).unwrap();

    static ref QUARTER_PATTERN: Regex = Regex::new(r"\b(?:Q[1-4]|[1-4]T|[1-4]Q)\s?\d{4}\b").unwrap();

    static ref NUMERIC_DATE_PATTERN: Regex = Regex::new(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b").unwrap();

    static ref YEAR_PATTERN: Regex = Regex::new(r"\b(?:19|20)\d{2}\b").unwrap();

    static ref WORD_PATTERN: Regex = Regex::new(r"\p{L}[\p{L}\p{N}'’\-]*").unwrap();
}

static ORG_NAMES: phf::Set<&'static str> = phf_set! {
    "apple", "microsoft", "google", "alphabet", "amazon", "tesla", "meta", "nvidia",
    "intel", "netflix", "oracle", "samsung", "sony", "toyota", "boeing", "pfizer",
    "santander", "banco santander", "bbva", "telefónica", "repsol", "iberdrola", "inditex",
    "federal reserve", "reserva federal", "banco central europeo", "european central bank",
    "banco de méxico", "goldman sachs", "morgan stanley", "jpmorgan", "openai",
};

/// Words that mark a capitalized run as an organization wherever they appear.
static ORG_MARKERS: phf::Set<&'static str> = phf_set! {
    "inc", "corp", "corporation", "ltd", "llc", "plc", "group", "grupo", "bank", "banco",
    "holdings", "company", "compañía", "technologies", "motors", "airlines", "capital",
};

static GPE_NAMES: phf::Set<&'static str> = phf_set! {
    "spain", "españa", "mexico", "méxico", "united states", "estados unidos", "china",
    "japan", "japón", "germany", "alemania", "france", "francia", "italy", "italia",
    "brazil", "brasil", "argentina", "colombia", "chile", "peru", "perú", "canada", "canadá",
    "india", "russia", "rusia", "madrid", "barcelona", "new york", "nueva york", "london",
    "londres", "washington", "beijing", "pekín", "tokyo", "tokio", "paris", "parís",
};

static LOC_NAMES: phf::Set<&'static str> = phf_set! {
    "europe", "europa", "asia", "africa", "áfrica", "latin america", "latinoamérica",
    "américa latina", "wall street", "silicon valley", "middle east", "oriente medio",
};

#[derive(Debug, Clone)]
struct RawSpan {
    start: usize,
    end: usize,
    label: &'static str,
}

impl RawSpan {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && self.start < end
    }
}

/// Find entity spans in `text`, ordered by position.
pub fn find_entity_spans(text: &str) -> Vec<EntitySpan> {
    let mut spans: Vec<RawSpan> = Vec::new();

    add_pattern_spans(&mut spans, &MONEY_PATTERN, text, "MONEY");
    add_pattern_spans(&mut spans, &MONTH_DATE_PATTERN, text, "DATE");
    add_pattern_spans(&mut spans, &QUARTER_PATTERN, text, "DATE");
    add_pattern_spans(&mut spans, &NUMERIC_DATE_PATTERN, text, "DATE");
    add_pattern_spans(&mut spans, &YEAR_PATTERN, text, "DATE");

    let runs = capitalized_runs(text, &spans);
    for run in runs {
        if let Some(span) = classify_run(text, &run) {
            spans.push(span);
        }
    }

    spans.sort_by_key(|s| s.start);
    spans
        .into_iter()
        .map(|s| EntitySpan {
            text: text[s.start..s.end].to_string(),
            label: s.label.to_string(),
        })
        .collect()
}

fn add_pattern_spans(spans: &mut Vec<RawSpan>, pattern: &Regex, text: &str, label: &'static str) {
    for m in pattern.find_iter(text) {
        if spans.iter().any(|s| s.overlaps(m.start(), m.end())) {
            continue;
        }
        spans.push(RawSpan {
            start: m.start(),
            end: m.end(),
            label,
        });
    }
}

/// A word with byte offsets.
#[derive(Debug, Clone)]
struct Word<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

fn is_capitalized(word: &str) -> bool {
    let first_upper = word.chars().next().map(char::is_uppercase).unwrap_or(false);
    // All-caps words are left to ticker extraction.
    first_upper && word.chars().any(char::is_lowercase)
}

/// Runs of capitalized words separated only by spaces, skipping words inside
/// already-claimed spans.
fn capitalized_runs<'a>(text: &'a str, claimed: &[RawSpan]) -> Vec<Vec<Word<'a>>> {
    let mut runs = Vec::new();
    let mut current: Vec<Word<'a>> = Vec::new();

    for m in WORD_PATTERN.find_iter(text) {
        let word = Word {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        };
        let usable = is_capitalized(word.text)
            && !claimed.iter().any(|s| s.overlaps(word.start, word.end));

        if !usable {
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
            continue;
        }

        let contiguous = current
            .last()
            .map(|prev| {
                let gap = &text[prev.end..word.start];
                !gap.is_empty() && gap.chars().all(|c| c == ' ')
            })
            .unwrap_or(true);
        if !contiguous {
            runs.push(std::mem::take(&mut current));
        }
        current.push(word);
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

fn is_sentence_initial(text: &str, start: usize) -> bool {
    match text[..start].chars().rev().find(|c| !c.is_whitespace()) {
        None => true,
        Some(c) => matches!(c, '.' | '!' | '?' | '¡' | '¿' | ':' | '"' | '“' | '«' | '('),
    }
}

fn gazetteer_label(lower: &str, words: &[Word<'_>]) -> Option<&'static str> {
    if ORG_NAMES.contains(lower)
        || words
            .iter()
            .any(|w| ORG_MARKERS.contains(w.text.to_lowercase().as_str()))
    {
        Some("ORG")
    } else if GPE_NAMES.contains(lower) {
        Some("GPE")
    } else if LOC_NAMES.contains(lower) {
        Some("LOC")
    } else {
        None
    }
}

fn classify_run(text: &str, run: &[Word<'_>]) -> Option<RawSpan> {
    let skip = run
        .iter()
        .take_while(|w| is_any_stopword(&w.text.to_lowercase()))
        .count();
    let mut words = &run[skip..];
    if words.is_empty() {
        return None;
    }

    let initial = skip == 0 && is_sentence_initial(text, words[0].start);
    let mut label = gazetteer_label(&run_text(text, words).to_lowercase(), words);

    // "Según Apple": a capitalized sentence opener glued to a known name.
    if label.is_none() && initial && words.len() > 1 {
        let rest = &words[1..];
        if let Some(rest_label) = gazetteer_label(&run_text(text, rest).to_lowercase(), rest) {
            words = rest;
            label = Some(rest_label);
        }
    }

    let label = match label {
        Some(l) => l,
        None if words.len() > 1 => "PERSON",
        None if initial => return None,
        None => "MISC",
    };

    Some(RawSpan {
        start: words[0].start,
        end: words[words.len() - 1].end,
        label,
    })
}

fn run_text<'a>(text: &'a str, words: &[Word<'_>]) -> &'a str {
    &text[words[0].start..words[words.len() - 1].end]
}
