//! Core types for page statistics.

use serde::{Deserialize, Serialize};

/// The mutually exclusive buckets a non-empty token is sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    /// Exactly one punctuation character.
    Punctuation,
    /// Numbers, dates, amounts of money, identifiers.
    NumberLike,
    /// Exactly one letter.
    SingleLetter,
    /// Contains a run of 4 or more identical non-numeric characters.
    RepeatedChars,
    /// Nothing alphabetic left after cleaning.
    GarbageNonAlpha,
    /// Fewer than 3 characters left after cleaning.
    TooShortAfterClean,
    CleanAllAlpha,
    CleanOneNonAlpha,
    CleanTwoNonAlpha,
    CleanThreeOrMoreNonAlpha,
}

impl TokenClass {
    /// Every class, in cascade order.
    pub const ALL: [TokenClass; 10] = [
        TokenClass::Punctuation,
        TokenClass::NumberLike,
        TokenClass::SingleLetter,
        TokenClass::RepeatedChars,
        TokenClass::GarbageNonAlpha,
        TokenClass::TooShortAfterClean,
        TokenClass::CleanAllAlpha,
        TokenClass::CleanOneNonAlpha,
        TokenClass::CleanTwoNonAlpha,
        TokenClass::CleanThreeOrMoreNonAlpha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Punctuation => "punctuation",
            TokenClass::NumberLike => "number_like",
            TokenClass::SingleLetter => "single_letter",
            TokenClass::RepeatedChars => "repeated_chars",
            TokenClass::GarbageNonAlpha => "garbage_non_alpha",
            TokenClass::TooShortAfterClean => "too_short_after_clean",
            TokenClass::CleanAllAlpha => "clean_all_alpha",
            TokenClass::CleanOneNonAlpha => "clean_one_non_alpha",
            TokenClass::CleanTwoNonAlpha => "clean_two_non_alpha",
            TokenClass::CleanThreeOrMoreNonAlpha => "clean_three_or_more_non_alpha",
        }
    }

    /// Whether tokens of this class count as plausibly real words.
    pub fn is_correctable(&self) -> bool {
        matches!(
            self,
            TokenClass::CleanAllAlpha | TokenClass::CleanOneNonAlpha | TokenClass::CleanTwoNonAlpha
        )
    }

    /// Whether tokens of this class are left out of the correctable denominator.
    pub fn is_ignored(&self) -> bool {
        matches!(
            self,
            TokenClass::NumberLike | TokenClass::Punctuation | TokenClass::SingleLetter
        )
    }
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-page token counters.
///
/// Every counted token lands in exactly one bucket, so `total_tokens` always
/// equals the sum of the ten bucket counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStatistics {
    pub total_tokens: usize,
    pub repeated_chars_tokens: usize,
    pub number_like_tokens: usize,
    pub punctuation_tokens: usize,
    pub single_letter_tokens: usize,
    pub garbage_non_alpha_tokens: usize,
    pub too_short_after_clean_tokens: usize,
    pub clean_all_alpha_tokens: usize,
    pub clean_one_non_alpha_tokens: usize,
    pub clean_two_non_alpha_tokens: usize,
    pub clean_three_or_more_non_alpha_tokens: usize,
}

impl PageStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one token of the given class.
    pub fn record(&mut self, class: TokenClass) {
        self.total_tokens += 1;
        *self.bucket_mut(class) += 1;
    }

    /// Number of tokens counted in a bucket.
    pub fn count(&self, class: TokenClass) -> usize {
        match class {
            TokenClass::Punctuation => self.punctuation_tokens,
            TokenClass::NumberLike => self.number_like_tokens,
            TokenClass::SingleLetter => self.single_letter_tokens,
            TokenClass::RepeatedChars => self.repeated_chars_tokens,
            TokenClass::GarbageNonAlpha => self.garbage_non_alpha_tokens,
            TokenClass::TooShortAfterClean => self.too_short_after_clean_tokens,
            TokenClass::CleanAllAlpha => self.clean_all_alpha_tokens,
            TokenClass::CleanOneNonAlpha => self.clean_one_non_alpha_tokens,
            TokenClass::CleanTwoNonAlpha => self.clean_two_non_alpha_tokens,
            TokenClass::CleanThreeOrMoreNonAlpha => self.clean_three_or_more_non_alpha_tokens,
        }
    }

    fn bucket_mut(&mut self, class: TokenClass) -> &mut usize {
        match class {
            TokenClass::Punctuation => &mut self.punctuation_tokens,
            TokenClass::NumberLike => &mut self.number_like_tokens,
            TokenClass::SingleLetter => &mut self.single_letter_tokens,
            TokenClass::RepeatedChars => &mut self.repeated_chars_tokens,
            TokenClass::GarbageNonAlpha => &mut self.garbage_non_alpha_tokens,
            TokenClass::TooShortAfterClean => &mut self.too_short_after_clean_tokens,
            TokenClass::CleanAllAlpha => &mut self.clean_all_alpha_tokens,
            TokenClass::CleanOneNonAlpha => &mut self.clean_one_non_alpha_tokens,
            TokenClass::CleanTwoNonAlpha => &mut self.clean_two_non_alpha_tokens,
            TokenClass::CleanThreeOrMoreNonAlpha => {
                &mut self.clean_three_or_more_non_alpha_tokens
            }
        }
    }

    /// Numbers, lone punctuation and single letters.
    pub fn ignored_tokens(&self) -> usize {
        self.number_like_tokens + self.punctuation_tokens + self.single_letter_tokens
    }

    /// Tokens matching the correctable profile: at least 3 characters after
    /// cleaning, at most 2 of them non-alphabetic.
    pub fn correctable_tokens(&self) -> usize {
        self.clean_all_alpha_tokens + self.clean_one_non_alpha_tokens + self.clean_two_non_alpha_tokens
    }

    /// Sum over all ten buckets.
    pub fn classified_tokens(&self) -> usize {
        TokenClass::ALL.iter().map(|c| self.count(*c)).sum()
    }

    /// Check the partition invariant.
    pub fn is_consistent(&self) -> bool {
        self.classified_tokens() == self.total_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_increments_total_and_bucket() {
        let mut stats = PageStatistics::new();
        stats.record(TokenClass::CleanAllAlpha);
        stats.record(TokenClass::CleanAllAlpha);
        stats.record(TokenClass::NumberLike);

        assert_eq!(stats.total_tokens, 3);
        assert_eq!(stats.clean_all_alpha_tokens, 2);
        assert_eq!(stats.count(TokenClass::NumberLike), 1);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_every_class_has_its_own_bucket() {
        let mut stats = PageStatistics::new();
        for class in TokenClass::ALL {
            stats.record(class);
        }
        for class in TokenClass::ALL {
            assert_eq!(stats.count(class), 1, "{}", class);
        }
        assert_eq!(stats.total_tokens, 10);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_ignored_and_correctable_sums() {
        let mut stats = PageStatistics::new();
        stats.record(TokenClass::Punctuation);
        stats.record(TokenClass::SingleLetter);
        stats.record(TokenClass::NumberLike);
        stats.record(TokenClass::CleanOneNonAlpha);
        stats.record(TokenClass::CleanTwoNonAlpha);
        stats.record(TokenClass::CleanThreeOrMoreNonAlpha);

        assert_eq!(stats.ignored_tokens(), 3);
        assert_eq!(stats.correctable_tokens(), 2);
    }

    #[test]
    fn test_class_flags_agree_with_counters() {
        let ignored: Vec<_> = TokenClass::ALL.iter().filter(|c| c.is_ignored()).collect();
        let correctable: Vec<_> = TokenClass::ALL
            .iter()
            .filter(|c| c.is_correctable())
            .collect();
        assert_eq!(ignored.len(), 3);
        assert_eq!(correctable.len(), 3);
    }
}
