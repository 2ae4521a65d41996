//! page-evaluator - scores OCR'd pages for correctability and quality.
//!
//! A page is reduced to an ordered sequence of tokens, each token is sorted
//! into exactly one lexical class, and two ratios are derived from the class
//! counts:
//!
//! - the correctable score: plausible words among the tokens that could be
//!   corrected at all
//! - the quality score: plausible words among all tokens
//!
//! # Architecture
//!
//! - `token`: the token record and the `TokenSource` capability
//! - `page`: format adapters (plain text, hOCR, Gale XML) producing tokens
//! - `tokenize`: word tokenizers for plain text pages
//! - `stats`: the classification cascade and per-page counters
//! - `score`: score derivation
//! - `config`, `report`, `cli`: configuration, output and the command line

pub mod cli;
pub mod config;
pub mod page;
pub mod report;
pub mod score;
pub mod stats;
pub mod token;
pub mod tokenize;

pub use page::{load_page, parse_page, Page, PageError, PageFormat, PageMetadata};
pub use score::{correctable_score, quality_score, PageScores, UNDEFINED_SCORE};
pub use stats::{calculate_statistics, PageStatistics, TokenClass};
pub use token::{Token, TokenSource};
pub use tokenize::{SimpleTokenizer, Tokenizer, TokenizerKind, UnicodeWordTokenizer};
