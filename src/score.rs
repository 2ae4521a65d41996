//! Page scores derived from token statistics.
//!
//! Both scores lie in `[0, 1]` when defined. A page with no eligible tokens
//! gets the sentinel [`UNDEFINED_SCORE`] instead.

use serde::{Deserialize, Serialize};

use crate::stats::PageStatistics;

/// Score reported when the denominator is zero.
pub const UNDEFINED_SCORE: f64 = -1.0;

/// The two scores of a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageScores {
    /// Correctable-profile tokens over tokens eligible for correction
    pub correctable: f64,
    /// Correctable-profile tokens over all tokens
    pub quality: f64,
}

impl PageScores {
    /// Compute both scores from a completed statistics pass.
    pub fn from_stats(stats: &PageStatistics) -> Self {
        Self {
            correctable: correctable_score(stats),
            quality: quality_score(stats),
        }
    }

    /// The correctable score, or `None` when undefined.
    pub fn correctable(&self) -> Option<f64> {
        defined(self.correctable)
    }

    /// The quality score, or `None` when undefined.
    pub fn quality(&self) -> Option<f64> {
        defined(self.quality)
    }

    /// Machine-readable form: `correctable,quality` with six decimals.
    pub fn to_csv(&self) -> String {
        format!("{:.6},{:.6}", self.correctable, self.quality)
    }
}

fn defined(score: f64) -> Option<f64> {
    if score == UNDEFINED_SCORE {
        None
    } else {
        Some(score)
    }
}

/// Tokens matching the correctable profile divided by the tokens that could
/// be corrected at all (everything except numbers, lone punctuation, single
/// letters and tokens too short after cleaning).
pub fn correctable_score(stats: &PageStatistics) -> f64 {
    let denominator = stats.total_tokens as i64
        - stats.ignored_tokens() as i64
        - stats.too_short_after_clean_tokens as i64;
    debug_assert!(denominator >= 0, "negative correctable denominator: {:?}", stats);

    ratio(stats.correctable_tokens(), denominator)
}

/// Tokens matching the correctable profile divided by all tokens.
pub fn quality_score(stats: &PageStatistics) -> f64 {
    ratio(stats.correctable_tokens(), stats.total_tokens as i64)
}

fn ratio(numerator: usize, denominator: i64) -> f64 {
    if denominator == 0 {
        return UNDEFINED_SCORE;
    }
    numerator as f64 / denominator as f64
}
