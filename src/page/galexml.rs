//! Gale page XML.
//!
//! Words are `<wd pos="left,top,right,bottom">` elements inside the
//! paragraphs of `pageContent`. The format has no explicit lines, so line
//! ends are inferred from word positions.

use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use super::{line_grouped_tokens, PageError, PageMetadata};
use crate::token::{Token, TokenSource};

const CONTENT_TAG: &str = "pageContent";

/// A word's bounding box in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl WordBox {
    /// Parse `left,top,right,bottom`.
    pub fn parse(pos: &str) -> Option<Self> {
        let coords: Vec<i64> = pos
            .split(',')
            .map(|c| c.trim().parse().ok())
            .collect::<Option<Vec<_>>>()?;
        match coords.as_slice() {
            [left, top, right, bottom] => Some(Self {
                left: *left,
                top: *top,
                right: *right,
                bottom: *bottom,
            }),
            _ => None,
        }
    }

    /// Whether `next` starts a new line after this box.
    pub fn breaks_before(&self, next: &WordBox) -> bool {
        next.top >= self.bottom || next.left < self.left
    }
}

/// One `<wd>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct GaleWord {
    pub text: String,
    pub pos: Option<WordBox>,
}

impl GaleWord {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A parsed Gale XML page.
#[derive(Debug, Clone)]
pub struct GaleXmlPage {
    record_id: Option<String>,
    source_page: Option<String>,
    ocr_confidence: Option<f64>,
    lines: Vec<Vec<GaleWord>>,
}

impl GaleXmlPage {
    pub fn parse(content: &str) -> Result<Self, PageError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(content, options)?;

        let page_content = find_element(doc.root(), CONTENT_TAG)
            .ok_or(PageError::MissingElement(CONTENT_TAG))?;

        let page_info = find_element(doc.root(), "pageInfo");
        let info = |tag: &str| {
            page_info
                .and_then(|info| find_element(info, tag))
                .and_then(|n| n.text())
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
        };

        let record_id = info("recordID");
        let source_page = info("sourcePage");
        let ocr_confidence = info("ocr").and_then(|c| c.parse().ok());

        let mut paragraphs: Vec<Node> = page_content
            .descendants()
            .filter(|n| n.has_tag_name("p"))
            .collect();
        if paragraphs.is_empty() {
            paragraphs.push(page_content);
        }

        let lines: Vec<Vec<GaleWord>> = paragraphs
            .into_iter()
            .flat_map(|p| split_lines(paragraph_words(p)))
            .collect();

        debug!(
            record_id = record_id.as_deref().unwrap_or(""),
            lines = lines.len(),
            words = lines.iter().map(Vec::len).sum::<usize>(),
            "parsed Gale XML page"
        );

        Ok(Self {
            record_id,
            source_page,
            ocr_confidence,
            lines,
        })
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn source_page(&self) -> Option<&str> {
        self.source_page.as_deref()
    }

    /// Page-level OCR confidence reported by the producer.
    pub fn ocr_confidence(&self) -> Option<f64> {
        self.ocr_confidence
    }

    /// Words grouped by inferred line.
    pub fn lines(&self) -> &[Vec<GaleWord>] {
        &self.lines
    }

    pub fn metadata(&self) -> PageMetadata {
        let page_id = match (&self.record_id, &self.source_page) {
            (Some(record), Some(page)) => Some(format!("{}:{}", record, page)),
            (Some(record), None) => Some(record.clone()),
            (None, page) => page.clone(),
        };

        PageMetadata {
            page_id,
            confidence: self.ocr_confidence,
            ..PageMetadata::default()
        }
    }
}

impl TokenSource for GaleXmlPage {
    fn tokens(&self) -> Box<dyn Iterator<Item = Token> + '_> {
        line_grouped_tokens(&self.lines, GaleWord::text)
    }
}

fn find_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.descendants().find(|n| n.has_tag_name(tag))
}

fn paragraph_words(paragraph: Node) -> Vec<GaleWord> {
    paragraph
        .descendants()
        .filter(|n| n.has_tag_name("wd"))
        .map(|wd| GaleWord {
            text: wd
                .descendants()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect(),
            pos: wd.attribute("pos").and_then(WordBox::parse),
        })
        .collect()
}

/// Split a paragraph's words into lines using their positions.
fn split_lines(words: Vec<GaleWord>) -> Vec<Vec<GaleWord>> {
    let mut lines = Vec::new();
    let mut current: Vec<GaleWord> = Vec::new();
    let mut words = words.into_iter().peekable();

    while let Some(word) = words.next() {
        let breaks = match (word.pos, words.peek().and_then(|next| next.pos)) {
            (Some(pos), Some(next)) => pos.breaks_before(&next),
            _ => false,
        };
        current.push(word);
        if breaks {
            lines.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<page type="bodyPage">
  <pageInfo>
    <recordID>0123400100</recordID>
    <sourcePage>7</sourcePage>
    <ocr>82.50</ocr>
  </pageInfo>
  <pageContent>
    <p>
      <wd pos="100,100,200,130">Hello</wd>
      <wd pos="210,100,300,130">wor-</wd>
      <wd pos="100,140,150,170">ld.</wd>
      <wd pos="160,140,260,170">Next</wd>
    </p>
    <p>
      <wd pos="100,200,180,230">Para</wd>
      <wd>two</wd>
    </p>
  </pageContent>
</page>"#;

    #[test]
    fn test_word_box_parse() {
        assert_eq!(
            WordBox::parse("1, 2,3,4"),
            Some(WordBox {
                left: 1,
                top: 2,
                right: 3,
                bottom: 4
            })
        );
        assert_eq!(WordBox::parse("1,2,3"), None);
        assert_eq!(WordBox::parse("a,b,c,d"), None);
    }

    #[test]
    fn test_line_break_inference() {
        let a = WordBox::parse("100,100,200,130").unwrap();
        let same_line = WordBox::parse("210,100,300,130").unwrap();
        let below = WordBox::parse("300,140,350,170").unwrap();
        let wrapped = WordBox::parse("50,110,90,128").unwrap();

        assert!(!a.breaks_before(&same_line));
        assert!(a.breaks_before(&below));
        assert!(a.breaks_before(&wrapped));
    }

    #[test]
    fn test_parse_page() {
        let page = GaleXmlPage::parse(PAGE).unwrap();
        assert_eq!(page.record_id(), Some("0123400100"));
        assert_eq!(page.source_page(), Some("7"));
        assert_eq!(page.ocr_confidence(), Some(82.5));
        assert_eq!(page.metadata().page_id.as_deref(), Some("0123400100:7"));
        assert_eq!(page.lines().len(), 3);
    }

    #[test]
    fn test_tokens_mark_line_ends() {
        let page = GaleXmlPage::parse(PAGE).unwrap();
        let tokens: Vec<Token> = page.tokens().collect();

        assert_eq!(
            tokens,
            vec![
                Token::word("Hello"),
                Token::line_end("wor-"),
                Token::word("ld."),
                Token::line_end("Next"),
                Token::word("Para"),
                Token::line_end("two"),
            ]
        );
    }

    #[test]
    fn test_missing_content() {
        let err = GaleXmlPage::parse("<page><pageInfo/></page>").unwrap_err();
        assert!(matches!(err, PageError::MissingElement(CONTENT_TAG)));
    }

    #[test]
    fn test_words_without_paragraphs() {
        let page = GaleXmlPage::parse(
            "<page><pageContent><wd pos=\"1,1,5,5\">only</wd></pageContent></page>",
        )
        .unwrap();
        let tokens: Vec<Token> = page.tokens().collect();
        assert_eq!(tokens, vec![Token::line_end("only")]);
    }
}
