//! Free-text similarity on a 0-100 scale.
//!
//! Both inputs are trimmed and lowercased before comparison. Exact and
//! substring matches short-circuit to fixed scores; everything else falls
//! back to Levenshtein distance normalized by the longer string's length.

/// Score for two strings that are equal after normalization.
pub const EXACT_MATCH_SCORE: f64 = 100.0;

/// Score for one normalized string containing the other.
pub const SUBSTRING_MATCH_SCORE: f64 = 90.0;

/// Compute the similarity of two strings in `[0.0, 100.0]`.
///
/// Returns `0.0` when either side is empty (or whitespace only), so two
/// empty strings score `0.0` rather than `100.0`. The function is pure and
/// symmetric.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return EXACT_MATCH_SCORE;
    }
    if a.contains(&b) || b.contains(&a) {
        return SUBSTRING_MATCH_SCORE;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = strsim::levenshtein(&a, &b);
    let score = (max_len as f64 - distance as f64) / max_len as f64 * 100.0;
    score.max(0.0)
}

/// Similarity of two optional fields; `0.0` unless both are present.
pub fn optional_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => similarity(a, b),
        _ => 0.0,
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
