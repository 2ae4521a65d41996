//! Configuration file for page-evaluator.
//!
//! All keys are optional; command-line flags take precedence.
//!
//! ```yaml
//! format: hocr        # txt, hocr or galexml
//! tokenizer: simple   # simple or unicode (txt pages only)
//! output: pretty      # pretty or json
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::page::PageFormat;
use crate::report::OutputFormat;
use crate::tokenize::TokenizerKind;

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["page-evaluator.yaml", ".page-evaluator.yaml"];

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Settings read from a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub format: Option<PageFormat>,
    #[serde(default)]
    pub tokenizer: Option<TokenizerKind>,
    #[serde(default)]
    pub output: Option<OutputFormat>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config from YAML text. An empty document is the default config.
    pub fn parse_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Page format, defaulting to hOCR.
    pub fn format(&self) -> PageFormat {
        self.format.unwrap_or_default()
    }

    /// Tokenizer for text pages, defaulting to the simple tokenizer.
    pub fn tokenizer(&self) -> TokenizerKind {
        self.tokenizer.unwrap_or_default()
    }

    /// Report style, defaulting to pretty.
    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }
}

/// Find a config file in `dir`.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load the given config file, or a discovered one, or the defaults.
pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover_config(dir),
    };

    match path {
        Some(p) => Ok((Config::parse_file(&p)?, Some(p))),
        None => Ok((Config::default(), None)),
    }
}
