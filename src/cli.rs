//! Command-line interface for newslens.

use clap::{Args, Parser, Subcommand};
use globset::GlobSet;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::analyze::{Language, LocalAnalyzer, NewsItem, Summarizer, SummaryOptions};
use crate::config::Config;
use crate::dictionary::{SectorDictionary, SentimentDictionary};
use crate::report::{self, AnalyzedDocument};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Article file extensions picked up when a directory is given.
const ARTICLE_EXTENSIONS: &[&str] = &["txt", "md"];

/// Deterministic news text analysis.
///
/// Newslens scores sentiment, ranks sectors, extracts entities, tickers
/// and keywords, and builds extractive summaries using dictionary lookups
/// and fixed rules only.
#[derive(Parser)]
#[command(name = "newslens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a news text, a file, or a directory of articles
    Analyze(AnalyzeArgs),
    /// Build extractive summaries
    Summarize(SummarizeArgs),
    /// Write default dictionaries and a config file
    Init(InitArgs),
    /// Inspect or reload dictionaries
    Dict(DictArgs),
}

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// File or directory to analyze, or `-` for stdin
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Force the language instead of detecting it: es or en
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the summarize command.
#[derive(Args)]
pub struct SummarizeArgs {
    /// File or directory to summarize, or `-` for stdin
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Title used for entity and keyword extraction (single input only)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Maximum sentences per summary
    #[arg(long)]
    pub max_sentences: Option<usize>,

    /// Maximum characters per summary
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Total character budget across all summaries
    #[arg(long)]
    pub budget: Option<usize>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Directory to write into
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,
}

/// Arguments for the dict command.
#[derive(Args)]
pub struct DictArgs {
    #[command(subcommand)]
    pub action: DictAction,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty", global = true)]
    pub format: String,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
pub enum DictAction {
    /// Show dictionary versions and annotator coverage
    Versions,
    /// Read both dictionaries again and report the result
    Reload,
}

/// Files written by `init`, relative to the target directory.
struct Template {
    path: &'static str,
    content: &'static str,
}

static TEMPLATES: &[Template] = &[
    Template {
        path: "newslens.yaml",
        content: include_str!("templates/newslens.yaml"),
    },
    Template {
        path: "dictionaries/sentiment_dictionary.json",
        content: include_str!("templates/sentiment_dictionary.json"),
    },
    Template {
        path: "dictionaries/sector_dictionary.json",
        content: include_str!("templates/sector_dictionary.json"),
    },
];

fn check_format(format: &str) -> bool {
    if format != "pretty" && format != "json" {
        eprintln!("Error: invalid format {:?}, must be 'pretty' or 'json'", format);
        return false;
    }
    true
}

fn load_config(path: Option<&Path>) -> Option<Config> {
    match Config::load(path) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            None
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Collect article files under `root`, skipping hidden directories and
/// excluded paths. Sorted for stable output.
pub fn collect_articles(root: &Path, excluded: &GlobSet) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            let hidden = e.depth() > 0 && e.file_name().to_string_lossy().starts_with('.');
            !(e.file_type().is_dir() && hidden)
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ARTICLE_EXTENSIONS.contains(&ext) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if excluded.is_match(relative) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Split an article file into a news item. The first line is taken as the
/// title when it has no sentence terminator and a body follows.
pub fn parse_article(id: &str, content: &str) -> NewsItem {
    let content = content.trim();
    if let Some((first, rest)) = content.split_once('\n') {
        let first = first.trim();
        let terminated = first.ends_with(['.', '!', '?']);
        if !first.is_empty() && !terminated && !rest.trim().is_empty() {
            return NewsItem {
                id: id.to_string(),
                title: Some(first.to_string()),
                body: rest.trim().to_string(),
            };
        }
    }
    NewsItem {
        id: id.to_string(),
        title: None,
        body: content.to_string(),
    }
}

fn file_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Read (source, text) pairs from a file, a directory, or stdin.
fn read_inputs(path: &Path, config: &Config) -> anyhow::Result<Vec<(String, String)>> {
    if is_stdin(path) {
        return Ok(vec![("stdin".to_string(), read_stdin()?)]);
    }
    if path.is_dir() {
        let excluded = config.exclusion_set()?;
        return collect_articles(path, &excluded)?
            .into_iter()
            .map(|p| -> anyhow::Result<(String, String)> {
                let text = std::fs::read_to_string(&p)?;
                let source = p.strip_prefix(path).unwrap_or(&p).to_string_lossy().to_string();
                Ok((source, text))
            })
            .collect();
    }
    let text = std::fs::read_to_string(path)?;
    Ok(vec![(path.to_string_lossy().to_string(), text)])
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("  {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if !check_format(&args.format) {
        return Ok(EXIT_ERROR);
    }
    let Some(config) = load_config(args.config.as_deref()) else {
        return Ok(EXIT_ERROR);
    };

    if !is_stdin(&args.path) && !args.path.exists() {
        eprintln!("Error: cannot access path {:?}", args.path);
        return Ok(EXIT_ERROR);
    }

    let inputs = read_inputs(&args.path, &config)?;
    if inputs.is_empty() {
        eprintln!("Warning: no articles to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let analyzer = LocalAnalyzer::from_config(&config)?;
    let pb = progress_bar(inputs.len(), args.path.is_dir() && args.format == "pretty");

    let documents = inputs
        .par_iter()
        .map(|(source, text)| {
            let result = analyzer.analyze(text, args.language);
            pb.inc(1);
            result.map(|result| AnalyzedDocument {
                source: source.clone(),
                result,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    pb.finish_and_clear();

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&path_str, &documents)?,
        _ => report::write_pretty(&path_str, &documents),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the summarize command.
pub fn run_summarize(args: &SummarizeArgs) -> anyhow::Result<i32> {
    if !check_format(&args.format) {
        return Ok(EXIT_ERROR);
    }
    let Some(mut config) = load_config(args.config.as_deref()) else {
        return Ok(EXIT_ERROR);
    };

    if let Some(n) = args.max_sentences {
        config.summary.max_sentences = n;
    }
    if args.max_chars.is_some() {
        config.summary.max_chars = args.max_chars;
    }
    if args.budget.is_some() {
        config.summary.batch_budget = args.budget;
    }
    if let Err(e) = crate::config::validate(&config) {
        eprintln!("Error: {}", e);
        return Ok(EXIT_ERROR);
    }

    if !is_stdin(&args.path) && !args.path.exists() {
        eprintln!("Error: cannot access path {:?}", args.path);
        return Ok(EXIT_ERROR);
    }

    let is_dir = args.path.is_dir();
    let items: Vec<NewsItem> = read_inputs(&args.path, &config)?
        .into_iter()
        .map(|(source, text)| {
            let id = if is_dir {
                file_id(Path::new(&source))
            } else {
                source.clone()
            };
            match (&args.title, is_dir) {
                (Some(title), false) => NewsItem {
                    id,
                    title: Some(title.clone()),
                    body: text,
                },
                _ => parse_article(&id, &text),
            }
        })
        .collect();

    let options: SummaryOptions = config.summary_options();
    let budget = config.summary.batch_budget;
    let summarizer = Summarizer::new(Arc::new(LocalAnalyzer::from_config(&config)?));
    let summaries = summarizer.summarize_batch(&items, options, budget)?;

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_summaries_json(&path_str, budget, &summaries)?,
        _ => report::write_summaries_pretty(&path_str, budget, &summaries),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Refuse before writing anything.
    for template in TEMPLATES {
        let target = args.dir.join(template.path);
        if target.exists() {
            eprintln!("Error: file already exists: {}", target.display());
            eprintln!("Remove it or use --dir to choose a different directory");
            return Ok(EXIT_ERROR);
        }
    }

    for template in TEMPLATES {
        let target = args.dir.join(template.path);
        if let Some(parent) = target.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
        if let Err(e) = std::fs::write(&target, template.content) {
            eprintln!("Error: failed to write {}: {}", target.display(), e);
            return Ok(EXIT_ERROR);
        }
        println!("Created {}", target.display());
    }

    let config_path = args.dir.join(TEMPLATES[0].path);
    println!();
    println!("Next steps:");
    println!("  1. Edit the dictionaries under {}", args.dir.join("dictionaries").display());
    println!("  2. Run: newslens analyze <file> --config {}", config_path.display());

    Ok(EXIT_SUCCESS)
}

/// Run the dict command.
pub fn run_dict(args: &DictArgs) -> anyhow::Result<i32> {
    if !check_format(&args.format) {
        return Ok(EXIT_ERROR);
    }
    let Some(config) = load_config(args.config.as_deref()) else {
        return Ok(EXIT_ERROR);
    };

    let analyzer = LocalAnalyzer::from_config(&config)?;
    if args.action == DictAction::Reload {
        let store = analyzer.store();
        store.load::<SentimentDictionary>(config.sentiment_filename());
        store.load::<SectorDictionary>(config.sector_filename());
        analyzer.reload_dictionaries();
    }

    let readiness = analyzer.readiness();
    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&readiness)?),
        _ => report::write_readiness(
            &readiness,
            config.sentiment_filename(),
            config.sector_filename(),
        ),
    }

    Ok(EXIT_SUCCESS)
}
