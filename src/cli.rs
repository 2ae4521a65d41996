//! Command-line interface for page-evaluator.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config;
use crate::page::{self, PageFormat};
use crate::report::{self, OutputFormat, PageReport};
use crate::score::PageScores;
use crate::tokenize::TokenizerKind;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// Compute a score that estimates the correctability of an OCR'd page.
///
/// The page's tokens are sorted into word, number, punctuation and garbage
/// classes; the correctable score is the share of plausible words among the
/// tokens that could be corrected, the quality score their share among all
/// tokens. A score of -1 means the page had no eligible tokens.
#[derive(Parser)]
#[command(name = "page-evaluator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The page OCR file
    pub page_ocr_file: PathBuf,

    /// Format of the page OCR file: txt, hocr, or galexml (default: hocr)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Quiet mode - only page scores are printed, separated by a comma
    #[arg(short, long)]
    pub quiet: bool,

    /// Report style when not quiet: pretty or json (default: pretty)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Tokenizer for txt pages: simple or unicode (default: simple)
    #[arg(short, long)]
    pub tokenizer: Option<String>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default level.
pub fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

/// Resolve a setting: the flag wins over the config file.
fn resolve<T: std::str::FromStr<Err = String>>(flag: Option<&str>, fallback: T) -> Result<T, String> {
    match flag {
        Some(value) => value.parse(),
        None => Ok(fallback),
    }
}

/// Evaluate one page and write its scores.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    let (config, config_path) = match config::load(cli.config.as_deref(), &cwd) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(ref path) = config_path {
        debug!("Using config {}", path.display());
    }

    let format: PageFormat = match resolve(cli.format.as_deref(), config.format()) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}, must be 'txt', 'hocr', or 'galexml'", e);
            return Ok(EXIT_ERROR);
        }
    };

    let tokenizer: TokenizerKind = match resolve(cli.tokenizer.as_deref(), config.tokenizer()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}, must be 'simple' or 'unicode'", e);
            return Ok(EXIT_ERROR);
        }
    };

    let output: OutputFormat = match resolve(cli.output.as_deref(), config.output()) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}, must be 'pretty' or 'json'", e);
            return Ok(EXIT_ERROR);
        }
    };

    let path = &cli.page_ocr_file;
    if !path.is_file() {
        eprintln!("Error: page OCR file not found: {}", path.display());
        return Ok(EXIT_ERROR);
    }

    if !cli.quiet {
        info!("Processing {}: {}", format, path.display());
    }

    let tokenizer = tokenizer.build();
    let page = page::load_page(path, format, &*tokenizer)
        .with_context(|| format!("parsing {} page {}", format, path.display()))?;

    let stats = page.statistics();
    let scores = PageScores::from_stats(&stats);
    debug!(?stats, "page statistics");

    let report = PageReport {
        path: path.to_string_lossy().to_string(),
        format,
        metadata: page.metadata(),
        stats,
        scores,
    };

    if cli.quiet {
        report::write_quiet(&report);
        return Ok(EXIT_SUCCESS);
    }

    info!(
        "Scores: correctable={}, quality={}",
        scores.correctable, scores.quality
    );

    match output {
        OutputFormat::Json => report::write_json(&report)?,
        OutputFormat::Pretty => report::write_pretty(&report),
    }

    Ok(EXIT_SUCCESS)
}
