//! Token classification and per-page statistics.

pub mod classify;
mod engine;
mod types;

pub use classify::{classify, clean_token};
pub use engine::calculate_statistics;
pub use types::{PageStatistics, TokenClass};
