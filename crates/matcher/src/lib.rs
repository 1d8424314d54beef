//! `strmarket-match`: Fuzzy matching of submarket / neighborhood labels.
//!
//! Leaf crate: pure functions over `&str`, no IO. Used by the reconciler for
//! fuzzy joins and standalone for matching user-typed names against a known list.

pub mod normalize;
pub mod search;
pub mod similarity;

pub use normalize::normalize_label;
pub use search::{find_best_match, MatchResult, DEFAULT_MATCH_THRESHOLD};
pub use similarity::similarity;
