//! Output formatting for newslens results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analyze::{
    AnalysisResult, EntityCategory, ItemSummary, Readiness, SentimentLabel,
};

// =============================================================================
// JSON Format
// =============================================================================

/// One analyzed document and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedDocument {
    pub source: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// JSON report for the analyze command.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub documents_analyzed: usize,
    pub documents: Vec<AnalyzedDocument>,
}

/// JSON report for the summarize command.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummaryReport {
    pub version: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<usize>,
    pub summaries: Vec<ItemSummary>,
}

pub fn build_json_report(path: &str, documents: &[AnalyzedDocument]) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        documents_analyzed: documents.len(),
        documents: documents.to_vec(),
    }
}

/// Write analysis results in JSON format.
pub fn write_json(path: &str, documents: &[AnalyzedDocument]) -> anyhow::Result<()> {
    let report = build_json_report(path, documents);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Write summaries in JSON format.
pub fn write_summaries_json(
    path: &str,
    budget: Option<usize>,
    summaries: &[ItemSummary],
) -> anyhow::Result<()> {
    let report = JsonSummaryReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        budget,
        summaries: summaries.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

fn write_header(label: &str, path: &str) {
    println!();
    print!("  ");
    print!("{}", "newslens".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print!("  {}", format!("{:<10}", label).dimmed());
    println!("{}", path);
    println!();
}

/// Write analysis results in colored, human-readable form.
pub fn write_pretty(path: &str, documents: &[AnalyzedDocument]) {
    write_header("Analyzing:", path);

    for doc in documents {
        write_document(doc);
        println!();
    }

    println!(
        "  {}",
        format!("{} document(s) analyzed", documents.len()).dimmed()
    );
    println!();
}

fn write_document(doc: &AnalyzedDocument) {
    let r = &doc.result;
    println!("  {}  {}", doc.source.blue().bold(), format!("[{}]", r.language).dimmed());

    print!("    {:<11}", "Sentiment".bold());
    write_colored_label(r.sentiment.label);
    println!(
        "  {}",
        format!(
            "(+{:.3} / -{:.3} / ={:.3}, confidence {:.3})",
            r.sentiment.positive, r.sentiment.negative, r.sentiment.neutral, r.confidence
        )
        .dimmed()
    );

    print!("    {:<11}", "Sectors".bold());
    if r.sectors.is_empty() {
        println!("{}", "none".dimmed());
    } else {
        let sectors: Vec<String> = r
            .sectors
            .iter()
            .map(|s| format!("{} {:.3}", s.sector, s.score))
            .collect();
        println!("{}", sectors.join(", "));
    }

    for category in EntityCategory::ALL {
        let values = r.entities.get(category);
        if !values.is_empty() {
            println!("    {:<11}{}", category.as_str().bold(), values.join(", "));
        }
    }

    if !r.tickers.is_empty() {
        println!("    {:<11}{}", "Tickers".bold(), r.tickers.join(", ").yellow());
    }
    if !r.keywords.is_empty() {
        println!("    {:<11}{}", "Keywords".bold(), r.keywords.join(", "));
    }
}

fn write_colored_label(label: SentimentLabel) {
    match label {
        SentimentLabel::Positive => print!("{}", label.as_str().green().bold()),
        SentimentLabel::Negative => print!("{}", label.as_str().red().bold()),
        SentimentLabel::Neutral => print!("{}", label.as_str().yellow()),
    }
}

/// Write summaries in colored, human-readable form.
pub fn write_summaries_pretty(path: &str, budget: Option<usize>, summaries: &[ItemSummary]) {
    write_header("Summary:", path);

    for s in summaries {
        print!("  {}", s.id.blue().bold());
        if s.truncated {
            print!("  {}", "(truncated)".yellow());
        }
        println!();
        println!("    {}", s.summary);
        println!();
    }

    if let Some(budget) = budget {
        let used: usize = summaries.iter().map(|s| s.summary.chars().count()).sum();
        println!(
            "  {}",
            format!("{} of {} budget characters used", used, budget).dimmed()
        );
        println!();
    }
}

/// Write dictionary versions and annotator coverage.
pub fn write_readiness(readiness: &Readiness, sentiment_file: &str, sector_file: &str) {
    println!();
    if readiness.is_ready() {
        println!("  {}", "✓ READY".green());
    } else {
        println!("  {}", "✗ DEGRADED".red());
    }
    println!();
    write_version_line(sentiment_file, readiness.sentiment_version.as_deref());
    write_version_line(sector_file, readiness.sector_version.as_deref());

    let languages: Vec<&str> = readiness.languages.iter().map(|l| l.code()).collect();
    print!("  {:<28}", readiness.annotator.dimmed());
    if languages.is_empty() {
        println!("{}", "no languages".red());
    } else {
        println!("{}", languages.join(", "));
    }
    println!();
}

fn write_version_line(file: &str, version: Option<&str>) {
    print!("  {:<28}", file.blue());
    match version {
        Some(v) => println!("{}", v),
        None => println!("{}", "unavailable (empty default)".yellow()),
    }
}
