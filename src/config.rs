//! Configuration schema for newslens.
//!
//! A config file selects the dictionary directory and file names and sets
//! the default limits for sector ranking, keywords and summaries.

use directories::ProjectDirs;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyze::{AnalyzerSettings, SummaryOptions};
use crate::dictionary::{SECTOR_DICTIONARY, SENTIMENT_DICTIONARY};

/// Config file names searched for, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["newslens.yaml", ".newslens.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Directory holding the dictionary files. Relative paths resolve
    /// against the config file's directory.
    #[serde(default)]
    pub dictionary_dir: Option<PathBuf>,
    #[serde(default)]
    pub sentiment_dictionary: Option<String>,
    #[serde(default)]
    pub sector_dictionary: Option<String>,
    #[serde(default)]
    pub sectors: SectorsConfig,
    #[serde(default)]
    pub keywords: KeywordsConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    /// Glob patterns for article paths to skip when analyzing a directory.
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectorsConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for SectorsConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeywordsConfig {
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            max_keywords: default_max_keywords(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryConfig {
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,
    #[serde(default)]
    pub max_chars: Option<usize>,
    /// Total character budget across a batch of summaries.
    #[serde(default)]
    pub batch_budget: Option<usize>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_sentences: default_max_sentences(),
            max_chars: None,
            batch_budget: None,
        }
    }
}

fn default_top_n() -> usize {
    3
}

fn default_max_keywords() -> usize {
    10
}

fn default_max_sentences() -> usize {
    3
}

impl Config {
    /// Parse a config from a YAML file. A relative `dictionary_dir` is
    /// resolved against the file's directory.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        if let Some(dir) = &config.dictionary_dir {
            if dir.is_relative() {
                let base = path.parent().unwrap_or_else(|| Path::new("."));
                config.dictionary_dir = Some(base.join(dir));
            }
        }
        Ok(config)
    }

    /// Find a config file in `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
    }

    /// Load the config at `path`, or discover one in the working directory,
    /// or fall back to defaults. The result is validated.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(p) => Self::parse_file(p)?,
            None => match Self::discover(Path::new(".")) {
                Some(p) => Self::parse_file(p)?,
                None => Self::default(),
            },
        };
        validate(&config)?;
        Ok(config)
    }

    /// Effective dictionary directory.
    pub fn dictionary_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dictionary_dir {
            return dir.clone();
        }
        ProjectDirs::from("", "", "newslens")
            .map(|dirs| dirs.config_dir().join("dictionaries"))
            .unwrap_or_else(|| PathBuf::from("dictionaries"))
    }

    pub fn sentiment_filename(&self) -> &str {
        self.sentiment_dictionary
            .as_deref()
            .unwrap_or(SENTIMENT_DICTIONARY)
    }

    pub fn sector_filename(&self) -> &str {
        self.sector_dictionary.as_deref().unwrap_or(SECTOR_DICTIONARY)
    }

    pub fn analyzer_settings(&self) -> AnalyzerSettings {
        AnalyzerSettings {
            top_n: self.sectors.top_n,
            max_keywords: self.keywords.max_keywords,
            sentiment_dictionary: self.sentiment_filename().to_string(),
            sector_dictionary: self.sector_filename().to_string(),
        }
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            max_sentences: self.summary.max_sentences,
            max_chars: self.summary.max_chars,
        }
    }

    /// Compiled matcher for `excluded_paths`.
    pub fn exclusion_set(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.sectors.top_n == 0 {
        anyhow::bail!("sectors.top_n must be at least 1");
    }
    if config.keywords.max_keywords == 0 {
        anyhow::bail!("keywords.max_keywords must be at least 1");
    }
    if config.summary.max_sentences == 0 {
        anyhow::bail!("summary.max_sentences must be at least 1");
    }
    if config.summary.max_chars == Some(0) {
        anyhow::bail!("summary.max_chars must be at least 1 when set");
    }

    for name in [&config.sentiment_dictionary, &config.sector_dictionary]
        .into_iter()
        .flatten()
    {
        if name.trim().is_empty() {
            anyhow::bail!("dictionary file names must not be empty");
        }
    }

    for pattern in &config.excluded_paths {
        Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}
