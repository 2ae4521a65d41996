//! hOCR pages.
//!
//! Only the first `ocr_page` of a document is considered. Words are the
//! `ocrx_word` elements of each line, in document order.

use roxmltree::{Document, Node, ParsingOptions};
use std::collections::BTreeMap;
use tracing::debug;

use super::{line_grouped_tokens, PageError, PageMetadata};
use crate::token::{Token, TokenSource};

const PAGE_CLASS: &str = "ocr_page";
const WORD_CLASS: &str = "ocrx_word";

/// Element classes that delimit a line of words.
const LINE_CLASSES: &[&str] = &["ocr_line", "ocr_caption", "ocr_header", "ocr_textfloat"];

/// One `ocrx_word` element.
#[derive(Debug, Clone, PartialEq)]
pub struct HocrWord {
    pub id: Option<String>,
    pub text: String,
    /// Properties from the `title` attribute, e.g. `bbox`, `x_wconf`.
    pub properties: BTreeMap<String, String>,
}

impl HocrWord {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Word confidence (`x_wconf`), if present and numeric.
    pub fn confidence(&self) -> Option<f64> {
        self.properties.get("x_wconf")?.trim().parse().ok()
    }
}

/// A parsed hOCR page.
#[derive(Debug, Clone)]
pub struct HocrPage {
    page_id: Option<String>,
    ocr_engine: Option<String>,
    ocr_capabilities: Vec<String>,
    lines: Vec<Vec<HocrWord>>,
}

impl HocrPage {
    pub fn parse(content: &str) -> Result<Self, PageError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(content, options)?;

        let ocr_engine = meta_content(&doc, "ocr-system");
        let ocr_capabilities = meta_content(&doc, "ocr-capabilities")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        let page = doc
            .descendants()
            .find(|n| has_class(n, PAGE_CLASS))
            .ok_or(PageError::MissingElement(PAGE_CLASS))?;
        let page_id = page.attribute("id").map(str::to_string);

        let lines: Vec<Vec<HocrWord>> = page
            .descendants()
            .filter(is_line)
            .map(|line| {
                line.descendants()
                    .filter(|n| has_class(n, WORD_CLASS))
                    .filter(|word| enclosing_line(word).as_ref() == Some(&line))
                    .map(parse_word)
                    .collect::<Vec<_>>()
            })
            .filter(|words| !words.is_empty())
            .collect();

        debug!(
            page_id = page_id.as_deref().unwrap_or(""),
            lines = lines.len(),
            words = lines.iter().map(Vec::len).sum::<usize>(),
            "parsed hOCR page"
        );

        Ok(Self {
            page_id,
            ocr_engine,
            ocr_capabilities,
            lines,
        })
    }

    pub fn page_id(&self) -> Option<&str> {
        self.page_id.as_deref()
    }

    pub fn ocr_engine(&self) -> Option<&str> {
        self.ocr_engine.as_deref()
    }

    pub fn ocr_capabilities(&self) -> &[String] {
        &self.ocr_capabilities
    }

    /// Words grouped by line.
    pub fn lines(&self) -> &[Vec<HocrWord>] {
        &self.lines
    }

    /// Mean `x_wconf` over the words that carry one.
    pub fn mean_word_confidence(&self) -> Option<f64> {
        let confidences: Vec<f64> = self
            .lines
            .iter()
            .flatten()
            .filter_map(HocrWord::confidence)
            .collect();
        if confidences.is_empty() {
            return None;
        }
        Some(confidences.iter().sum::<f64>() / confidences.len() as f64)
    }

    pub fn metadata(&self) -> PageMetadata {
        PageMetadata {
            page_id: self.page_id.clone(),
            ocr_engine: self.ocr_engine.clone(),
            ocr_capabilities: self.ocr_capabilities.clone(),
            confidence: self.mean_word_confidence(),
            ..PageMetadata::default()
        }
    }
}

impl TokenSource for HocrPage {
    fn tokens(&self) -> Box<dyn Iterator<Item = Token> + '_> {
        line_grouped_tokens(&self.lines, HocrWord::text)
    }
}

fn has_class(node: &Node, class: &str) -> bool {
    node.is_element()
        && node
            .attribute("class")
            .map(|c| c.split_whitespace().any(|name| name == class))
            .unwrap_or(false)
}

fn is_line(node: &Node) -> bool {
    LINE_CLASSES.iter().any(|c| has_class(node, c))
}

/// The innermost line element holding a node. Floats and captions may nest
/// `ocr_line` elements, and each word belongs only to its nearest line.
fn enclosing_line<'a, 'input>(node: &Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.ancestors().skip(1).find(is_line)
}

fn meta_content(doc: &Document, name: &str) -> Option<String> {
    doc.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "meta")
        .find(|n| n.attribute("name") == Some(name))
        .and_then(|n| n.attribute("content"))
        .map(str::to_string)
}

fn parse_word(node: Node) -> HocrWord {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();

    HocrWord {
        id: node.attribute("id").map(str::to_string),
        text,
        properties: parse_title(node.attribute("title").unwrap_or("")),
    }
}

/// Parse `name value; name value` pairs. Fragments without a value are skipped.
pub fn parse_title(title: &str) -> BTreeMap<String, String> {
    title
        .split(';')
        .filter_map(|prop| prop.trim().split_once(' '))
        .map(|(name, value)| (name.to_string(), value.trim().to_string()))
        .collect()
}
