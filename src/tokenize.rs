//! Word tokenizers for free text pages.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    static ref LETTER_PATTERN: Regex = Regex::new(r"^\p{L}$").unwrap();

    static ref DIGIT_PATTERN: Regex = Regex::new(r"^\p{Nd}$").unwrap();
}

/// Splits free text into an ordered list of token strings.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the text. Whitespace never appears in the output.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Available tokenizers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Character-class tokenizer
    #[default]
    Simple,
    /// Unicode word boundaries (UAX #29)
    Unicode,
}

impl TokenizerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenizerKind::Simple => "simple",
            TokenizerKind::Unicode => "unicode",
        }
    }

    /// Build the tokenizer this kind names.
    pub fn build(&self) -> Box<dyn Tokenizer> {
        match self {
            TokenizerKind::Simple => Box::new(SimpleTokenizer),
            TokenizerKind::Unicode => Box::new(UnicodeWordTokenizer),
        }
    }
}

impl std::fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TokenizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(TokenizerKind::Simple),
            "unicode" => Ok(TokenizerKind::Unicode),
            _ => Err(format!("unknown tokenizer: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Alphabetic,
    Numeric,
    Other,
}

impl CharClass {
    fn of(ch: char) -> Self {
        let mut buf = [0u8; 4];
        let s: &str = ch.encode_utf8(&mut buf);

        if ch.is_whitespace() {
            CharClass::Whitespace
        } else if LETTER_PATTERN.is_match(s) {
            CharClass::Alphabetic
        } else if DIGIT_PATTERN.is_match(s) {
            CharClass::Numeric
        } else {
            CharClass::Other
        }
    }
}

/// Splits text wherever the character class changes.
///
/// Runs of letters (`\p{L}`) and runs of decimal digits (`\p{Nd}`) form
/// tokens. Any other character, superscripts and fractions included, forms a
/// token on its own, except that a run of the same character stays together
/// (`...` is one token, `.,` is two).
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut start = 0;
        let mut state = CharClass::Whitespace;
        let mut prev: Option<char> = None;

        for (idx, ch) in text.char_indices() {
            let class = CharClass::of(ch);

            if state == CharClass::Whitespace {
                if class != CharClass::Whitespace {
                    start = idx;
                }
            } else if class != state || (class == CharClass::Other && prev != Some(ch)) {
                tokens.push(text[start..idx].to_string());
                start = idx;
            }

            state = class;
            prev = Some(ch);
        }

        if state != CharClass::Whitespace {
            tokens.push(text[start..].to_string());
        }

        tokens
    }
}

/// Splits text on Unicode word boundaries, dropping whitespace segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}
