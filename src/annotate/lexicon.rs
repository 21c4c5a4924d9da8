//! Built-in deterministic annotator.
//!
//! Tokenizes with a Unicode word/punctuation pattern, flags stop words from
//! fixed lists, lemmatizes through an irregular-form table (anything not in
//! the table lemmatizes to its lower-cased surface form) and tags entities
//! with [`find_entity_spans`](super::spans::find_entity_spans).

use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;

use super::spans::find_entity_spans;
use super::stopwords::stopwords;
use super::traits::{Annotation, Annotator, Token};
use crate::analyze::Language;
use crate::error::AnnotateError;
use crate::text::split_sentences;

lazy_static! {
    static ref TOKEN_PATTERN: Regex =
        Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]").unwrap();
}

static ENGLISH_LEMMAS: phf::Map<&'static str, &'static str> = phf_map! {
    "is" => "be", "are" => "be", "was" => "be", "were" => "be", "been" => "be",
    "has" => "have", "had" => "have",
    "ran" => "run", "rose" => "rise", "risen" => "rise", "fell" => "fall", "fallen" => "fall",
    "grew" => "grow", "grown" => "grow", "sold" => "sell", "bought" => "buy", "lost" => "lose",
    "beat" => "beat", "made" => "make", "took" => "take", "said" => "say", "saw" => "see",
    "better" => "good", "best" => "good", "worse" => "bad", "worst" => "bad",
    "gains" => "gain", "losses" => "loss", "profits" => "profit", "shares" => "share",
    "stocks" => "stock", "markets" => "market", "companies" => "company",
    "investors" => "investor", "earnings" => "earnings", "sales" => "sale",
};

static SPANISH_LEMMAS: phf::Map<&'static str, &'static str> = phf_map! {
    "es" => "ser", "son" => "ser", "fue" => "ser", "fueron" => "ser", "era" => "ser",
    "ha" => "haber", "han" => "haber", "había" => "haber",
    "subió" => "subir", "suben" => "subir", "cayó" => "caer", "caen" => "caer",
    "creció" => "crecer", "crecen" => "crecer", "anunció" => "anunciar",
    "ganancias" => "ganancia", "pérdidas" => "pérdida", "acciones" => "acción",
    "empresas" => "empresa", "mercados" => "mercado", "inversores" => "inversor",
    "resultados" => "resultado", "ventas" => "venta", "beneficios" => "beneficio",
};

/// Rule-based annotator for Spanish and English.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconAnnotator;

impl LexiconAnnotator {
    pub fn new() -> Self {
        Self
    }

    fn lemmatize(lower: &str, language: Language) -> String {
        let table = match language {
            Language::Es => &SPANISH_LEMMAS,
            Language::En => &ENGLISH_LEMMAS,
        };
        table
            .get(lower)
            .map(|l| l.to_string())
            .unwrap_or_else(|| lower.to_string())
    }

    fn tokenize(text: &str, language: Language) -> Vec<Token> {
        let stops = stopwords(language);
        TOKEN_PATTERN
            .find_iter(text)
            .map(|m| {
                let surface = m.as_str();
                let lower = surface.to_lowercase();
                Token {
                    text: surface.to_string(),
                    lemma: Self::lemmatize(&lower, language),
                    is_stop: stops.contains(lower.as_str()),
                    is_punct: surface.chars().all(|c| !c.is_alphanumeric()),
                    is_alpha: surface.chars().all(char::is_alphabetic),
                }
            })
            .collect()
    }
}

impl Annotator for LexiconAnnotator {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn supports(&self, _language: Language) -> bool {
        true
    }

    fn annotate(&self, text: &str, language: Language) -> Result<Annotation, AnnotateError> {
        Ok(Annotation {
            tokens: Self::tokenize(text, language),
            entities: find_entity_spans(text),
            sentences: split_sentences(text).into_iter().map(|s| s.text).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_flags() {
        let ann = LexiconAnnotator::new()
            .annotate("The stocks rose 5%, well-known", Language::En)
            .unwrap();
        let by_text = |t: &str| ann.tokens.iter().find(|tok| tok.text == t).unwrap().clone();

        let the = by_text("The");
        assert!(the.is_stop && the.is_alpha && !the.is_punct);

        let stocks = by_text("stocks");
        assert_eq!(stocks.lemma, "stock");

        assert_eq!(by_text("rose").lemma, "rise");

        let five = by_text("5");
        assert!(!five.is_alpha && !five.is_punct);

        let pct = by_text("%");
        assert!(pct.is_punct && !pct.is_alpha);

        // Hyphenated compounds stay one token and are not purely alphabetic.
        assert!(!by_text("well-known").is_alpha);
    }

    #[test]
    fn test_spanish_lemmas_and_stops() {
        let ann = LexiconAnnotator::new()
            .annotate("Las acciones subió en el mercado", Language::Es)
            .unwrap();
        let lemmas: Vec<_> = ann.content_lemmas().collect();
        assert_eq!(lemmas, vec!["acción", "subir", "mercado"]);
    }

    #[test]
    fn test_annotation_is_deterministic() {
        let annotator = LexiconAnnotator::new();
        let text = "Apple reported $2 billion in Q3 2024. Tim Cook was pleased.";
        let first = annotator.annotate(text, Language::En).unwrap();
        for _ in 0..5 {
            assert_eq!(annotator.annotate(text, Language::En).unwrap(), first);
        }
        assert_eq!(first.sentences.len(), 2);
    }
}
