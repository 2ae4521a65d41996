//! Plain text pages.

use lazy_static::lazy_static;
use regex::Regex;
use std::io::BufRead;
use tracing::debug;

use super::{PageError, PageMetadata};
use crate::token::{Token, TokenSource};
use crate::tokenize::Tokenizer;

lazy_static! {
    /// A word broken with a hyphen at the end of a line.
    static ref HYPHENATED_WORD_PATTERN: Regex =
        Regex::new(r"(?m)(\S*\p{L})-\n(\p{L}\S*)\s*").unwrap();
}

/// A page of free text, tokenized up front.
#[derive(Debug, Clone)]
pub struct TxtPage {
    id: String,
    tokens: Vec<String>,
}

impl TxtPage {
    /// Read a text page, merge end-of-line hyphenations and tokenize it.
    pub fn parse<R: BufRead>(
        reader: R,
        id: &str,
        tokenizer: &dyn Tokenizer,
    ) -> Result<Self, PageError> {
        let mut text = String::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if !line.is_empty() {
                text.push_str(line);
                text.push('\n');
            }
        }

        let text = join_hyphenated_words(&text);
        let tokens = tokenizer.tokenize(&text);
        debug!(page_id = id, tokens = tokens.len(), "parsed text page");

        Ok(Self {
            id: id.to_string(),
            tokens,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn metadata(&self) -> PageMetadata {
        PageMetadata {
            page_id: Some(self.id.clone()),
            ..PageMetadata::default()
        }
    }
}

impl TokenSource for TxtPage {
    fn tokens(&self) -> Box<dyn Iterator<Item = Token> + '_> {
        Box::new(self.tokens.iter().map(|t| Token::word(t.as_str())))
    }
}

/// Merge words split across lines with a hyphen. The rest of the next line
/// stays on a line of its own.
pub fn join_hyphenated_words(text: &str) -> String {
    HYPHENATED_WORD_PATTERN
        .replace_all(text, "$1$2\n")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::SimpleTokenizer;

    fn parse(text: &str) -> TxtPage {
        TxtPage::parse(text.as_bytes(), "page-1", &SimpleTokenizer).unwrap()
    }

    fn texts(page: &TxtPage) -> Vec<String> {
        page.tokens().map(|t| t.text).collect()
    }

    #[test]
    fn test_join_hyphenated_words() {
        assert_eq!(join_hyphenated_words("inter-\nnational law\n"), "international\nlaw\n");
        assert_eq!(join_hyphenated_words("a well-\nknown\n"), "a wellknown\n");
    }

    #[test]
    fn test_join_keeps_hyphen_before_non_letters() {
        assert_eq!(join_hyphenated_words("pages 12-\n14\n"), "pages 12-\n14\n");
        assert_eq!(join_hyphenated_words("dash -\nhere\n"), "dash -\nhere\n");
    }

    #[test]
    fn test_parse_drops_blank_lines_and_merges() {
        let page = parse("  The inter-  \n\n   national\tlaw.  \n");
        assert_eq!(texts(&page), vec!["The", "international", "law", "."]);
    }

    #[test]
    fn test_tokens_never_end_lines() {
        let page = parse("one\ntwo\n");
        assert!(page.tokens().all(|t| !t.is_last_on_line));
        assert_eq!(page.token_count(), 2);
    }

    #[test]
    fn test_empty_page() {
        let page = parse("\n   \n");
        assert_eq!(page.token_count(), 0);
        assert_eq!(page.metadata().page_id.as_deref(), Some("page-1"));
    }
}
