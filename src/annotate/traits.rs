//! The linguistic annotation seam.
//!
//! The pipeline never tokenizes or tags text itself. It asks an
//! [`Annotator`] for lemmas, token flags and entity spans, and degrades to a
//! sentence-only annotation when the provider cannot help.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analyze::Language;
use crate::error::AnnotateError;
use crate::text::split_sentences;

/// One annotated token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form as it appears in the text.
    pub text: String,
    pub lemma: String,
    pub is_stop: bool,
    pub is_punct: bool,
    pub is_alpha: bool,
}

/// A named-entity span with the provider's raw label (e.g. `ORG`, `LOC`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
}

/// Full-document annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub tokens: Vec<Token>,
    pub entities: Vec<EntitySpan>,
    pub sentences: Vec<String>,
}

impl Annotation {
    /// Minimal annotation: sentence boundaries only, no tokens or entities.
    pub fn sentences_only(text: &str) -> Self {
        Self {
            tokens: Vec::new(),
            entities: Vec::new(),
            sentences: split_sentences(text).into_iter().map(|s| s.text).collect(),
        }
    }

    /// Lower-cased lemmas of alphabetic, non-stop, non-punctuation tokens.
    pub fn content_lemmas(&self) -> impl Iterator<Item = String> + '_ {
        self.tokens
            .iter()
            .filter(|t| t.is_alpha && !t.is_stop && !t.is_punct)
            .map(|t| t.lemma.to_lowercase())
    }
}

/// A provider of linguistic annotation.
///
/// Implementations must be deterministic: the same text and language must
/// always produce the same annotation.
pub trait Annotator: Send + Sync {
    /// Provider name for diagnostics.
    fn name(&self) -> &str;

    /// Whether a model is available for `language`.
    fn supports(&self, language: Language) -> bool;

    /// Annotate a full document.
    fn annotate(&self, text: &str, language: Language) -> Result<Annotation, AnnotateError>;
}

/// Annotate with `annotator`, falling back to [`Annotation::sentences_only`]
/// when the language is unsupported or the provider fails.
pub fn annotate_or_fallback(annotator: &dyn Annotator, text: &str, language: Language) -> Annotation {
    if !annotator.supports(language) {
        warn!(
            provider = annotator.name(),
            language = language.code(),
            "no annotation model for language, using sentence-only annotation"
        );
        return Annotation::sentences_only(text);
    }

    match annotator.annotate(text, language) {
        Ok(annotation) => annotation,
        Err(e) => {
            warn!(provider = annotator.name(), error = %e, "annotation failed, using sentence-only annotation");
            Annotation::sentences_only(text)
        }
    }
}

/// Annotator with no models. Every call goes through the fallback path.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAnnotator;

impl Annotator for NullAnnotator {
    fn name(&self) -> &str {
        "null"
    }

    fn supports(&self, _language: Language) -> bool {
        false
    }

    fn annotate(&self, _text: &str, language: Language) -> Result<Annotation, AnnotateError> {
        Err(AnnotateError::UnsupportedLanguage(language))
    }
}
