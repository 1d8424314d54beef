use crate::normalize::{normalize_label, significant_tokens};

/// Score returned when one normalized label contains the other.
///
/// Strong evidence, but capped below an exact match so that "Hillcrest"
/// prefers "Hillcrest" over "Hillcrest Heights".
pub const CONTAINMENT_SCORE: f64 = 0.8;

/// Similarity of two free-text labels in `[0, 1]`.
///
/// Exact match after normalization scores `1.0`, containment scores
/// [`CONTAINMENT_SCORE`], anything else takes the better of the edit-distance
/// and token-overlap scores. Symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_label(a);
    let b = normalize_label(b);

    if a == b {
        return 1.0;
    }
    if a.contains(b.as_str()) || b.contains(a.as_str()) {
        return CONTAINMENT_SCORE;
    }

    edit_similarity(&a, &b).max(token_similarity(&a, &b))
}

/// `1 - levenshtein / max_len`, measured in chars.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - strsim::levenshtein(a, b) as f64 / max_len as f64
}

/// Fraction of significant tokens shared by equality or substring relation.
///
/// Each token of the shorter list counts at most once. When both lists have
/// the same length the count is taken in both directions and the larger one
/// wins, which keeps the score symmetric.
pub fn token_similarity(a: &str, b: &str) -> f64 {
    let ta = significant_tokens(a);
    let tb = significant_tokens(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let matches = match ta.len().cmp(&tb.len()) {
        std::cmp::Ordering::Less => count_overlapping(&ta, &tb),
        std::cmp::Ordering::Greater => count_overlapping(&tb, &ta),
        std::cmp::Ordering::Equal => count_overlapping(&ta, &tb).max(count_overlapping(&tb, &ta)),
    };

    matches as f64 / ta.len().max(tb.len()) as f64
}

fn count_overlapping(shorter: &[&str], other: &[&str]) -> usize {
    shorter
        .iter()
        .filter(|t| other.iter().any(|o| o == *t || o.contains(*t) || t.contains(o)))
        .count()
}
