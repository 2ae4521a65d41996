//! The statistics pass over a page's tokens.

use tracing::trace;

use super::{classify, PageStatistics};
use crate::token::{Token, TokenSource};

impl PageStatistics {
    /// Classify and count a sequence of tokens.
    ///
    /// A token that ends its line with a hyphen is joined with the following
    /// token (hyphen removed) and the pair is counted as a single token.
    /// Tokens that are empty after trimming are skipped.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token>,
    {
        let mut stats = PageStatistics::new();
        let mut tokens = tokens.into_iter();

        while let Some(token) = tokens.next() {
            let mut text = token.text.trim().to_string();

            if token.is_last_on_line && text.ends_with('-') {
                if let Some(next) = tokens.next() {
                    text.pop();
                    text.push_str(next.text.trim());
                }
            }

            stats.record_text(&text);
        }

        debug_assert!(stats.is_consistent());
        stats
    }

    /// Classify one trimmed token and count it. Empty text is ignored.
    pub fn record_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let class = classify::classify(text);
        trace!(token = text, class = class.as_str(), "classified token");
        self.record(class);
    }
}

/// Run a statistics pass over everything a token source produces.
pub fn calculate_statistics<S>(source: &S) -> PageStatistics
where
    S: TokenSource + ?Sized,
{
    PageStatistics::from_tokens(source.tokens())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::TokenClass;

    fn words(texts: &[&str]) -> Vec<Token> {
        texts.iter().map(|t| Token::word(*t)).collect()
    }

    #[test]
    fn test_empty_sequence() {
        let stats = PageStatistics::from_tokens(Vec::new());
        assert_eq!(stats, PageStatistics::default());
    }

    #[test]
    fn test_blank_tokens_are_skipped() {
        let stats = PageStatistics::from_tokens(words(&["", "   ", "\t\n"]));
        assert_eq!(stats, PageStatistics::default());

        let stats = PageStatistics::from_tokens(words(&["", "word", " "]));
        assert_eq!(stats.total_tokens, 1);
        assert_eq!(stats.clean_all_alpha_tokens, 1);
    }

    #[test]
    fn test_tokens_are_trimmed() {
        let stats = PageStatistics::from_tokens(words(&["  a ", " . "]));
        assert_eq!(stats.single_letter_tokens, 1);
        assert_eq!(stats.punctuation_tokens, 1);
    }

    #[test]
    fn test_hyphen_join_at_line_end() {
        let tokens = vec![Token::line_end("inter-"), Token::word("national")];
        let stats = PageStatistics::from_tokens(tokens);

        assert_eq!(stats.total_tokens, 1);
        assert_eq!(stats.clean_all_alpha_tokens, 1);
    }

    #[test]
    fn test_hyphen_without_line_end_is_not_joined() {
        let tokens = vec![Token::word("inter-"), Token::word("national")];
        let stats = PageStatistics::from_tokens(tokens);

        assert_eq!(stats.total_tokens, 2);
        // "inter-" cleans to "inter"
        assert_eq!(stats.clean_all_alpha_tokens, 2);
    }

    #[test]
    fn test_hyphen_at_end_of_page_stays() {
        let tokens = vec![Token::word("the"), Token::line_end("inter-")];
        let stats = PageStatistics::from_tokens(tokens);

        assert_eq!(stats.total_tokens, 2);
        assert_eq!(stats.clean_all_alpha_tokens, 2);
    }

    #[test]
    fn test_hyphen_join_trims_next_token() {
        let tokens = vec![Token::line_end(" wor- "), Token::word("  ld. ")];
        let stats = PageStatistics::from_tokens(tokens);

        assert_eq!(stats.total_tokens, 1);
        assert_eq!(stats.clean_all_alpha_tokens, 1);
    }

    #[test]
    fn test_lone_hyphen_joined_with_blank_is_skipped() {
        let tokens = vec![Token::line_end("-"), Token::word(" ")];
        let stats = PageStatistics::from_tokens(tokens);
        assert_eq!(stats.total_tokens, 0);
    }

    #[test]
    fn test_end_to_end_example() {
        let tokens = vec![
            Token::word("Hello"),
            Token::line_end("wor-"),
            Token::word("ld."),
        ];
        let stats = PageStatistics::from_tokens(tokens);

        let expected = PageStatistics {
            total_tokens: 2,
            clean_all_alpha_tokens: 2,
            ..PageStatistics::default()
        };
        assert_eq!(stats, expected);
    }

    #[test]
    fn test_repeated_garbage_token() {
        let stats = PageStatistics::from_tokens(words(&["####"]));
        assert_eq!(stats.total_tokens, 1);
        assert_eq!(stats.count(TokenClass::RepeatedChars), 1);
    }

    #[test]
    fn test_partition_invariant_on_mixed_page() {
        let stats = PageStatistics::from_tokens(words(&[
            "The", "year", "1789", ",", "a", "####", "!?", "of", "don't", "12th", "a1b2c3",
            "tlie", "$5", "\u{2014}",
        ]));
        assert_eq!(stats.total_tokens, 14);
        assert!(stats.is_consistent());
        assert!(stats.total_tokens >= stats.ignored_tokens() + stats.too_short_after_clean_tokens);
    }

    #[test]
    fn test_repeated_passes_are_identical() {
        let source = words(&["Lorem", "ipsum", "d0lor", "sit", "....", "7"]);
        let first = calculate_statistics(&source);
        let second = calculate_statistics(&source);
        assert_eq!(first, second);
    }
}
