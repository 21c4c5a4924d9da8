//! Linguistic annotation providers.
//!
//! The analysis pipeline consumes annotation through the [`Annotator`]
//! trait: tokens with lemma and stop/punct/alpha flags, entity spans with
//! raw labels, and sentence boundaries.
//!
//! - [`LexiconAnnotator`]: built-in deterministic rule-based provider
//! - [`NullAnnotator`]: no models; every call takes the fallback path
//!
//! Any other provider (an external tagger, a service client) plugs in by
//! implementing [`Annotator`].

mod lexicon;
mod spans;
mod stopwords;
mod traits;

pub use lexicon::LexiconAnnotator;
pub use spans::find_entity_spans;
pub use stopwords::stopwords;
pub use traits::{annotate_or_fallback, Annotation, Annotator, EntitySpan, NullAnnotator, Token};
