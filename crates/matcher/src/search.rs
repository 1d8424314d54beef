use serde::Serialize;

use crate::similarity::similarity;

/// Default acceptance threshold for [`find_best_match`].
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// Best candidate for a target label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    #[serde(rename = "match")]
    pub matched: String,
    pub similarity: f64,
}

/// Pick the candidate most similar to `target`.
///
/// Candidates are scanned in order and only a strictly higher score replaces
/// the current best, so the first of several equal scores wins. Returns `None`
/// for an empty candidate list or when the best score is below `threshold`.
pub fn find_best_match<S: AsRef<str>>(
    target: &str,
    candidates: &[S],
    threshold: f64,
) -> Option<MatchResult> {
    let mut best: Option<(&str, f64)> = None;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let score = similarity(target, candidate);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.filter(|(_, score)| *score >= threshold)
        .map(|(matched, similarity)| MatchResult {
            matched: matched.to_string(),
            similarity,
        })
}
