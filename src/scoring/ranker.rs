//! Ordering and selection of scored candidates.

use crate::scoring::ScoredCandidate;

/// Default result count for personalized rankings.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;
/// Default result count for the popularity fallback.
pub const DEFAULT_POPULAR_LIMIT: usize = 10;
/// Default result count for category-scoped rankings.
pub const DEFAULT_CATEGORY_LIMIT: usize = 5;

/// Normalizes a caller-supplied limit.
///
/// Non-numeric or non-positive values fall back to the default rather than
/// producing an error.
pub fn normalize_limit(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|&value| value > 0)
        .map_or(default, |value| value as usize)
}

/// Sorts candidates into the total order and truncates to `limit`.
///
/// Primary key: total score descending. Ties break by higher popularity,
/// then lower course id, so repeated runs over identical input produce
/// identical output.
pub fn rank(mut candidates: Vec<ScoredCandidate>, limit: usize) -> Vec<ScoredCandidate> {
    candidates.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| b.course.popularity.cmp(&a.course.popularity))
            .then_with(|| a.course.id.cmp(&b.course.id))
    });
    candidates.truncate(limit);
    candidates
}
