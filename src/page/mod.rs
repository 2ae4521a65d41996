//! Page formats and the adapters that turn them into tokens.
//!
//! Three formats are supported:
//! - `txt`: free text, tokenized with a [`Tokenizer`]
//! - `hocr`: hOCR markup with explicit lines and words
//! - `galexml`: Gale page XML with positioned words

mod error;
pub mod galexml;
pub mod hocr;
pub mod txt;

pub use error::PageError;
pub use galexml::GaleXmlPage;
pub use hocr::HocrPage;
pub use txt::TxtPage;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::stats::{calculate_statistics, PageStatistics};
use crate::token::{Token, TokenSource};
use crate::tokenize::Tokenizer;

/// Supported page formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    Txt,
    #[default]
    Hocr,
    GaleXml,
}

impl PageFormat {
    pub const ALL: [PageFormat; 3] = [PageFormat::Txt, PageFormat::Hocr, PageFormat::GaleXml];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageFormat::Txt => "txt",
            PageFormat::Hocr => "hocr",
            PageFormat::GaleXml => "galexml",
        }
    }
}

impl std::fmt::Display for PageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" => Ok(PageFormat::Txt),
            "hocr" => Ok(PageFormat::Hocr),
            "galexml" => Ok(PageFormat::GaleXml),
            _ => Err(format!("unknown page format: {}", s)),
        }
    }
}

/// Descriptive information a page format may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_engine: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ocr_capabilities: Vec<String>,
    /// Mean word confidence, or the producer's page confidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A parsed page in one of the supported formats.
#[derive(Debug, Clone)]
pub enum Page {
    Txt(TxtPage),
    Hocr(HocrPage),
    GaleXml(GaleXmlPage),
}

impl Page {
    pub fn format(&self) -> PageFormat {
        match self {
            Page::Txt(_) => PageFormat::Txt,
            Page::Hocr(_) => PageFormat::Hocr,
            Page::GaleXml(_) => PageFormat::GaleXml,
        }
    }

    pub fn metadata(&self) -> PageMetadata {
        match self {
            Page::Txt(page) => page.metadata(),
            Page::Hocr(page) => page.metadata(),
            Page::GaleXml(page) => page.metadata(),
        }
    }

    /// Classify and count this page's tokens.
    pub fn statistics(&self) -> PageStatistics {
        calculate_statistics(self)
    }
}

impl TokenSource for Page {
    fn tokens(&self) -> Box<dyn Iterator<Item = Token> + '_> {
        match self {
            Page::Txt(page) => page.tokens(),
            Page::Hocr(page) => page.tokens(),
            Page::GaleXml(page) => page.tokens(),
        }
    }
}

/// Parse page content in the given format. `id` names text pages.
pub fn parse_page(
    format: PageFormat,
    content: &str,
    id: &str,
    tokenizer: &dyn Tokenizer,
) -> Result<Page, PageError> {
    match format {
        PageFormat::Txt => Ok(Page::Txt(TxtPage::parse(content.as_bytes(), id, tokenizer)?)),
        PageFormat::Hocr => Ok(Page::Hocr(HocrPage::parse(content)?)),
        PageFormat::GaleXml => Ok(Page::GaleXml(GaleXmlPage::parse(content)?)),
    }
}

/// Read and parse a page file. Text pages are named after the file.
pub fn load_page<P: AsRef<Path>>(
    path: P,
    format: PageFormat,
    tokenizer: &dyn Tokenizer,
) -> Result<Page, PageError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let id = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    parse_page(format, &content, &id, tokenizer)
}

/// Tokens for words grouped by line; the last word of each line ends it.
pub(crate) fn line_grouped_tokens<'a, W, F>(
    lines: &'a [Vec<W>],
    text: F,
) -> Box<dyn Iterator<Item = Token> + 'a>
where
    F: Fn(&W) -> &str + Copy + 'a,
{
    Box::new(lines.iter().flat_map(move |line| {
        let last = line.len().saturating_sub(1);
        line.iter()
            .enumerate()
            .map(move |(i, word)| Token::new(text(word), i == last))
    }))
}
