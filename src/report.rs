//! Output formatting for page-evaluator results.
//!
//! Supports three output styles:
//! - Quiet: a single `correctable,quality` line for scripts
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::page::{PageFormat, PageMetadata};
use crate::score::{PageScores, UNDEFINED_SCORE};
use crate::stats::{PageStatistics, TokenClass};

/// Report styles for non-quiet runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

/// Everything known about one evaluated page.
#[derive(Debug, Clone)]
pub struct PageReport {
    pub path: String,
    pub format: PageFormat,
    pub metadata: PageMetadata,
    pub stats: PageStatistics,
    pub scores: PageScores,
}

// =============================================================================
// Quiet Format
// =============================================================================

/// Write the machine-readable `correctable,quality` line.
pub fn write_quiet(report: &PageReport) {
    println!("{}", report.scores.to_csv());
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub format: String,
    #[serde(flatten)]
    pub metadata: PageMetadata,
    pub correctable_score: f64,
    pub quality_score: f64,
    pub statistics: PageStatistics,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Token count for one class.
#[derive(Debug, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub class: String,
    pub tokens: usize,
}

impl JsonReport {
    pub fn from_report(report: &PageReport) -> Self {
        let breakdown = TokenClass::ALL
            .iter()
            .map(|class| BreakdownEntry {
                class: class.as_str().to_string(),
                tokens: report.stats.count(*class),
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: report.path.clone(),
            format: report.format.to_string(),
            metadata: report.metadata.clone(),
            correctable_score: report.scores.correctable,
            quality_score: report.scores.quality,
            statistics: report.stats,
            breakdown,
        }
    }
}

/// Write results in JSON format.
pub fn write_json(report: &PageReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&JsonReport::from_report(report))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(report: &PageReport) {
    // Header
    println!();
    print!("  ");
    print!("{}", "page-evaluator".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Page:   ".dimmed());
    println!("{}", report.path);
    print!("  {}", "Format: ".dimmed());
    println!("{}", report.format);
    write_metadata(&report.metadata);
    println!();

    print!("  Correctable: ");
    write_colored_score(report.scores.correctable);
    print!("  Quality: ");
    write_colored_score(report.scores.quality);
    println!();
    println!();

    write_breakdown(&report.stats);
    println!();
}

fn write_metadata(metadata: &PageMetadata) {
    if let Some(ref id) = metadata.page_id {
        print!("  {}", "Page id:".dimmed());
        println!(" {}", id);
    }
    if let Some(ref engine) = metadata.ocr_engine {
        print!("  {}", "Engine: ".dimmed());
        println!("{}", engine);
    }
    if let Some(confidence) = metadata.confidence {
        print!("  {}", "OCR confidence: ".dimmed());
        println!("{:.2}", confidence);
    }
}

fn write_colored_score(score: f64) {
    if score == UNDEFINED_SCORE {
        print!("{}", "n/a".dimmed());
        return;
    }

    let text = format!("{:.4}", score);
    match score {
        s if s >= 0.9 => print!("{}", text.green().bold()),
        s if s >= 0.75 => print!("{}", text.green()),
        s if s >= 0.5 => print!("{}", text.yellow()),
        s if s >= 0.25 => print!("{}", text.yellow().bold()),
        _ => print!("{}", text.red()),
    }
}

fn write_breakdown(stats: &PageStatistics) {
    println!("  {} ({} tokens):", "Breakdown".bold(), stats.total_tokens);

    for class in TokenClass::ALL {
        let count = stats.count(class);
        let name = format!("{:<30}", class.as_str());
        let name = if class.is_correctable() {
            name.green()
        } else if class.is_ignored() {
            name.dimmed()
        } else {
            name.normal()
        };
        println!("    {} {:>6}  {}", name, count, percentage(count, stats.total_tokens).dimmed());
    }
}

fn percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:5.1}%", count as f64 * 100.0 / total as f64)
}
