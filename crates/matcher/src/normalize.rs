/// Lowercase, trim, then drop every character outside `[a-z0-9\s]`.
///
/// Trimming happens before stripping, so `"Gaslamp !"` keeps its inner space
/// (`"gaslamp "`). Non-ASCII letters are dropped along with punctuation.
pub fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

/// Whitespace tokens longer than two characters.
///
/// Short tokens ("st", "of", "la") carry almost no signal between sources.
pub(crate) fn significant_tokens(normalized: &str) -> Vec<&str> {
    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() > 2)
        .collect()
}
