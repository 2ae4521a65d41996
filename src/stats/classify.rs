//! Lexical classification of a single token.
//!
//! Character categories follow Unicode general categories as implemented by
//! the `regex` crate: punctuation is `P*`, letters are `L*`, numbers are `N*`
//! and currency symbols are `Sc`.

use lazy_static::lazy_static;
use regex::Regex;

use super::TokenClass;

/// Maximum punctuation characters stripped from the start of a token.
pub const MAX_LEADING_PUNCT_TO_REMOVE: usize = 1;
/// Maximum punctuation characters stripped from the end of a token.
pub const MAX_TRAILING_PUNCT_TO_REMOVE: usize = 3;
/// Minimum cleaned length for a token to be considered a word.
pub const CLEAN_TOKEN_LEN_THRESHOLD: usize = 3;
/// Minimum length of a run of identical characters that marks garbage.
pub const REPEATED_CHARS_THRESHOLD: usize = 4;

lazy_static! {
    static ref PUNCT_PATTERN: Regex = Regex::new(r"^\p{P}$").unwrap();

    /// Numbers, dates, amounts of money and number-based identifiers.
    static ref NUMBER_LIKE_PATTERN: Regex =
        Regex::new(r"^\p{Sc}?[.,/\-]?(?:\p{N}+[.,/%\-]?)+\p{Sc}?$").unwrap();

    static ref ONE_ALPHA_PATTERN: Regex = Regex::new(r"^\p{L}$").unwrap();

    static ref NON_ALPHA_PATTERN: Regex = Regex::new(r"\P{L}").unwrap();

    static ref LEADING_PUNCT_PATTERN: Regex =
        Regex::new(&format!(r"^\p{{P}}{{0,{}}}", MAX_LEADING_PUNCT_TO_REMOVE)).unwrap();

    static ref TRAILING_PUNCT_PATTERN: Regex =
        Regex::new(&format!(r"\p{{P}}{{0,{}}}$", MAX_TRAILING_PUNCT_TO_REMOVE)).unwrap();
}

/// Classify one trimmed, non-empty token. The first matching rule wins.
pub fn classify(text: &str) -> TokenClass {
    if PUNCT_PATTERN.is_match(text) {
        return TokenClass::Punctuation;
    }

    if NUMBER_LIKE_PATTERN.is_match(text) {
        return TokenClass::NumberLike;
    }

    if ONE_ALPHA_PATTERN.is_match(text) {
        return TokenClass::SingleLetter;
    }

    if has_repeated_chars(&text.to_lowercase()) {
        return TokenClass::RepeatedChars;
    }

    let clean = clean_token(text);
    let clean_len = clean.chars().count();
    let non_alpha = count_non_alpha(&clean);

    if non_alpha == clean_len {
        return TokenClass::GarbageNonAlpha;
    }

    if clean_len < CLEAN_TOKEN_LEN_THRESHOLD {
        return TokenClass::TooShortAfterClean;
    }

    match non_alpha {
        0 => TokenClass::CleanAllAlpha,
        1 => TokenClass::CleanOneNonAlpha,
        2 => TokenClass::CleanTwoNonAlpha,
        _ => TokenClass::CleanThreeOrMoreNonAlpha,
    }
}

/// Strip at most one leading and three trailing punctuation characters.
pub fn clean_token(text: &str) -> String {
    let stripped = LEADING_PUNCT_PATTERN.replace(text, "");
    TRAILING_PUNCT_PATTERN.replace(&stripped, "").into_owned()
}

/// Count characters that are not letters.
pub fn count_non_alpha(text: &str) -> usize {
    NON_ALPHA_PATTERN.find_iter(text).count()
}

/// Whether the text holds a run of 4 or more identical non-numeric characters.
pub fn has_repeated_chars(text: &str) -> bool {
    let mut prev: Option<char> = None;
    let mut run = 0;

    for ch in text.chars() {
        if ch.is_numeric() {
            prev = None;
            run = 0;
            continue;
        }

        if prev == Some(ch) {
            run += 1;
        } else {
            prev = Some(ch);
            run = 1;
        }

        if run >= REPEATED_CHARS_THRESHOLD {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_punctuation() {
        assert_eq!(classify("."), TokenClass::Punctuation);
        assert_eq!(classify(","), TokenClass::Punctuation);
        assert_eq!(classify("#"), TokenClass::Punctuation);
        assert_eq!(classify("\u{201C}"), TokenClass::Punctuation);
    }

    #[test]
    fn test_currency_sign_alone_is_garbage() {
        // `$` is a symbol (Sc), not punctuation
        assert_eq!(classify("$"), TokenClass::GarbageNonAlpha);
    }

    #[test]
    fn test_number_like() {
        assert_eq!(classify("123-45"), TokenClass::NumberLike);
        assert_eq!(classify("1850"), TokenClass::NumberLike);
        assert_eq!(classify("1850."), TokenClass::NumberLike);
        assert_eq!(classify("$12.50"), TokenClass::NumberLike);
        assert_eq!(classify("12/03/1789"), TokenClass::NumberLike);
        assert_eq!(classify("45%"), TokenClass::NumberLike);
        assert_eq!(classify("-3"), TokenClass::NumberLike);
        assert_eq!(classify("100\u{00A3}"), TokenClass::NumberLike);
        assert_eq!(classify("1111"), TokenClass::NumberLike);
    }

    #[test]
    fn test_number_like_wins_over_later_rules() {
        // contains a hyphen, and a run of digits, but never reaches them
        assert_eq!(classify("123-45"), TokenClass::NumberLike);
        assert_eq!(classify("0000-0000"), TokenClass::NumberLike);
    }

    #[test]
    fn test_single_letter() {
        assert_eq!(classify("a"), TokenClass::SingleLetter);
        assert_eq!(classify("I"), TokenClass::SingleLetter);
        assert_eq!(classify("\u{00E9}"), TokenClass::SingleLetter);
    }

    #[test]
    fn test_repeated_chars() {
        assert_eq!(classify("####"), TokenClass::RepeatedChars);
        assert_eq!(classify("...."), TokenClass::RepeatedChars);
        assert_eq!(classify("aaaa"), TokenClass::RepeatedChars);
        assert_eq!(classify("AaAa"), TokenClass::RepeatedChars);
        assert_eq!(classify("Sheeeeep"), TokenClass::RepeatedChars);
    }

    #[test]
    fn test_has_repeated_chars_ignores_digits() {
        assert!(!has_repeated_chars("a1111b"));
        assert!(!has_repeated_chars("aaa"));
        assert!(!has_repeated_chars("aaa1a"));
        assert!(has_repeated_chars("xx----"));
    }

    #[test]
    fn test_garbage_non_alpha() {
        assert_eq!(classify("!?"), TokenClass::GarbageNonAlpha);
        assert_eq!(classify("--"), TokenClass::GarbageNonAlpha);
        assert_eq!(classify("(1)"), TokenClass::GarbageNonAlpha);
        assert_eq!(classify("+*+"), TokenClass::GarbageNonAlpha);
    }

    #[test]
    fn test_too_short_after_clean() {
        assert_eq!(classify("ab"), TokenClass::TooShortAfterClean);
        assert_eq!(classify("of."), TokenClass::TooShortAfterClean);
        assert_eq!(classify("x..."), TokenClass::TooShortAfterClean);
    }

    #[test]
    fn test_clean_buckets() {
        assert_eq!(classify("Hello"), TokenClass::CleanAllAlpha);
        assert_eq!(classify("world."), TokenClass::CleanAllAlpha);
        assert_eq!(classify("\"hello,\""), TokenClass::CleanAllAlpha);
        assert_eq!(classify("don't"), TokenClass::CleanOneNonAlpha);
        assert_eq!(classify("12th"), TokenClass::CleanTwoNonAlpha);
        assert_eq!(classify("t3st1ng"), TokenClass::CleanTwoNonAlpha);
        assert_eq!(classify("a1b2c3"), TokenClass::CleanThreeOrMoreNonAlpha);
    }

    #[test]
    fn test_clean_token_limits() {
        assert_eq!(clean_token("((abc"), "(abc");
        assert_eq!(clean_token("abc!!!!"), "abc!");
        assert_eq!(clean_token("abc..."), "abc");
        assert_eq!(clean_token("..."), "");
        assert_eq!(clean_token("abc"), "abc");
        assert_eq!(clean_token("$abc"), "$abc");
    }

    #[test]
    fn test_count_non_alpha() {
        assert_eq!(count_non_alpha("abc"), 0);
        assert_eq!(count_non_alpha("a-b"), 1);
        assert_eq!(count_non_alpha("\u{00FC}ber"), 0);
        assert_eq!(count_non_alpha(""), 0);
    }
}
