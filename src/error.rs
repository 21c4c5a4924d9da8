//! Error types for the analysis pipeline.
//!
//! Missing or malformed dictionaries and unavailable annotation models are
//! not errors: they degrade to empty results. What remains here are genuine
//! I/O faults and caller contract violations.

use std::path::PathBuf;

use thiserror::Error;

use crate::analyze::Language;

/// Errors raised while reading a dictionary file from disk.
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("reading dictionary {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a linguistic annotation provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotateError {
    #[error("no annotation model available for language {0}")]
    UnsupportedLanguage(Language),
    #[error("annotation failed: {0}")]
    Failed(String),
}

/// Errors surfaced by analysis operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// Result alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
