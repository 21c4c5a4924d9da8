//! Versioned dictionary store with an in-memory cache.
//!
//! Dictionaries are read once per filename and shared as `Arc` values.
//! A reload replaces the whole cache entry, so concurrent readers see either
//! the old or the new dictionary, never a partially built one.

use std::any::Any;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use super::types::DictionaryKind;
use crate::error::DictionaryError;

/// Result of reading a dictionary file that did not hit an I/O fault.
#[derive(Debug)]
pub enum LoadOutcome<D> {
    /// The file was present and matched the schema.
    Loaded(D),
    /// The file was missing or malformed; the shaped default applies.
    Defaulted { reason: String },
}

/// Where a cached dictionary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    File,
    Default,
}

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    origin: Origin,
}

/// Loads and caches dictionaries from a directory, keyed by filename.
pub struct DictionaryStore {
    dir: PathBuf,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

impl DictionaryStore {
    /// Create a store rooted at `dir`. Nothing is read until the first load.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Directory the store reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Return the cached dictionary, reading it on first use.
    ///
    /// Missing and malformed files resolve to the shaped default (logged).
    /// Only I/O faults other than "not found" are returned as errors.
    pub fn try_load<D: DictionaryKind>(&self, filename: &str) -> Result<Arc<D>, DictionaryError> {
        if let Some((cached, _)) = self.cached::<D>(filename) {
            return Ok(cached);
        }
        self.read_and_cache(filename).map(|(dict, _)| dict)
    }

    /// Like [`try_load`](Self::try_load), but I/O faults also fall back to
    /// the shaped default. Never fails.
    pub fn load<D: DictionaryKind>(&self, filename: &str) -> Arc<D> {
        match self.try_load::<D>(filename) {
            Ok(dict) => dict,
            Err(e) => {
                warn!(kind = D::KIND, filename, error = %e, "using empty dictionary");
                Arc::new(D::shaped_default())
            }
        }
    }

    /// Evict `filename` and load it again from disk.
    ///
    /// The fresh copy is read before the old entry is replaced, so readers
    /// racing with the reload never observe a missing entry.
    pub fn reload<D: DictionaryKind>(&self, filename: &str) -> Arc<D> {
        info!(kind = D::KIND, filename, "reloading dictionary");
        match self.read_and_cache::<D>(filename) {
            Ok((dict, _)) => dict,
            Err(e) => {
                if let Ok(mut cache) = self.cache.write() {
                    cache.remove(filename);
                }
                warn!(kind = D::KIND, filename, error = %e, "using empty dictionary");
                Arc::new(D::shaped_default())
            }
        }
    }

    /// Declared version of a dictionary, or `None` if it is unavailable.
    ///
    /// Resolves through the typed loader, so a file that fails the schema
    /// reports `None` whether or not it was cached before.
    pub fn version<D: DictionaryKind>(&self, filename: &str) -> Option<String> {
        let (dict, origin) = match self.cached::<D>(filename) {
            Some(hit) => hit,
            None => self.read_and_cache::<D>(filename).ok()?,
        };
        match origin {
            Origin::File => Some(dict.version().to_string()),
            Origin::Default => None,
        }
    }

    /// Where the cached copy of `filename` came from, if it is cached.
    pub fn origin(&self, filename: &str) -> Option<Origin> {
        let cache = self.cache.read().ok()?;
        cache.get(filename).map(|e| e.origin)
    }

    fn cached<D: DictionaryKind>(&self, filename: &str) -> Option<(Arc<D>, Origin)> {
        let cache = self.cache.read().ok()?;
        let entry = cache.get(filename)?;
        // A filename cached as a different kind is treated as a miss.
        let dict = Arc::clone(&entry.value).downcast::<D>().ok()?;
        Some((dict, entry.origin))
    }

    fn read_and_cache<D: DictionaryKind>(
        &self,
        filename: &str,
    ) -> Result<(Arc<D>, Origin), DictionaryError> {
        let path = self.dir.join(filename);
        let (dict, origin) = match read_dictionary::<D>(&path)? {
            LoadOutcome::Loaded(dict) => {
                debug!(kind = D::KIND, filename, version = dict.version(), "dictionary loaded");
                (dict, Origin::File)
            }
            LoadOutcome::Defaulted { reason } => {
                warn!(kind = D::KIND, filename, %reason, "dictionary unavailable, using empty default");
                (D::shaped_default(), Origin::Default)
            }
        };

        let dict = Arc::new(dict);
        let value: Arc<dyn Any + Send + Sync> = dict.clone();
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(filename.to_string(), CacheEntry { value, origin });
        }
        Ok((dict, origin))
    }
}

/// Read and parse a dictionary file without touching any cache.
pub fn read_dictionary<D: DictionaryKind>(path: &Path) -> Result<LoadOutcome<D>, DictionaryError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Ok(LoadOutcome::Defaulted {
                reason: "file not found".to_string(),
            })
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Ok(LoadOutcome::Defaulted {
                reason: format!("file is not valid UTF-8: {}", e),
            })
        }
        Err(source) => {
            return Err(DictionaryError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_str::<D>(&content) {
        Ok(mut dict) => {
            dict.normalize();
            Ok(LoadOutcome::Loaded(dict))
        }
        Err(e) => Ok(LoadOutcome::Defaulted {
            reason: format!("malformed {} dictionary: {}", D::KIND, e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::Language;
    use crate::dictionary::{SectorDictionary, SentimentCategory, SentimentDictionary};
    use tempfile::TempDir;

    const SENTIMENT_JSON: &str = r#"{
        "version": "1.0",
        "positive": {"es": ["ganancia"], "en": ["gain"]},
        "negative": {"es": ["pérdida"], "en": ["loss"]},
        "neutral": {"es": [], "en": []}
    }"#;

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp = TempDir::new().unwrap();
        let store = DictionaryStore::new(temp.path());

        let dict = store.load::<SentimentDictionary>("missing.json");
        assert_eq!(*dict, SentimentDictionary::shaped_default());
        assert_eq!(store.origin("missing.json"), Some(Origin::Default));
        assert_eq!(store.version::<SentimentDictionary>("missing.json"), None);
    }

    #[test]
    fn test_load_malformed_file_returns_default() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("bad.json"), "{ not json").unwrap();
        let store = DictionaryStore::new(temp.path());

        let dict = store.load::<SectorDictionary>("bad.json");
        assert!(dict.sectors.is_empty());
        assert_eq!(store.version::<SectorDictionary>("bad.json"), None);
    }

    #[test]
    fn test_load_caches_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sentiment.json");
        std::fs::write(&path, SENTIMENT_JSON).unwrap();
        let store = DictionaryStore::new(temp.path());

        let first = store.load::<SentimentDictionary>("sentiment.json");
        // Changing the file does not affect the cached copy.
        std::fs::remove_file(&path).unwrap();
        let second = store.load::<SentimentDictionary>("sentiment.json");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            store.version::<SentimentDictionary>("sentiment.json"),
            Some("1.0".to_string())
        );
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sentiment.json");
        std::fs::write(&path, SENTIMENT_JSON).unwrap();
        let store = DictionaryStore::new(temp.path());

        let before = store.load::<SentimentDictionary>("sentiment.json");
        std::fs::write(&path, SENTIMENT_JSON.replace("1.0", "1.1")).unwrap();
        let after = store.reload::<SentimentDictionary>("sentiment.json");

        assert_eq!(before.version, "1.0");
        assert_eq!(after.version, "1.1");
        assert_eq!(
            after.terms(SentimentCategory::Positive, Language::Es),
            &["ganancia".to_string()]
        );
    }

    #[test]
    fn test_version_without_loading() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("sectors.json"), r#"{"version": "3.2", "sectors": {}}"#)
            .unwrap();
        let store = DictionaryStore::new(temp.path());
        assert_eq!(store.origin("sectors.json"), None);
        assert_eq!(
            store.version::<SectorDictionary>("sectors.json"),
            Some("3.2".to_string())
        );
        assert_eq!(store.origin("sectors.json"), Some(Origin::File));
    }

    #[test]
    fn test_version_of_schema_invalid_file_is_stable() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("s.json"), r#"{"version": "9", "positive": {}}"#).unwrap();
        let store = DictionaryStore::new(temp.path());

        let before = store.version::<SentimentDictionary>("s.json");
        store.load::<SentimentDictionary>("s.json");
        let after = store.version::<SentimentDictionary>("s.json");

        assert_eq!(before, None);
        assert_eq!(after, None);
        assert_eq!(store.origin("s.json"), Some(Origin::Default));
    }

    #[test]
    fn test_read_dictionary_outcomes() {
        let temp = TempDir::new().unwrap();
        let missing = read_dictionary::<SectorDictionary>(&temp.path().join("nope.json")).unwrap();
        assert!(matches!(missing, LoadOutcome::Defaulted { .. }));

        // A directory in place of the file is an I/O fault, not "not found".
        let dir_path = temp.path().join("subdir.json");
        std::fs::create_dir(&dir_path).unwrap();
        assert!(read_dictionary::<SectorDictionary>(&dir_path).is_err());
    }
}
