//! The four signal extractors. Each yields a value in `[0, 1]`.

use chrono::{DateTime, Utc};

use crate::models::UserProfile;

/// Average scroll time (seconds) at which engagement saturates.
const ENGAGEMENT_SATURATION_SECS: f64 = 60.0;

/// View-frequency saturation point: `ln(count + 1) / ln(10)` reaches 1 at 9.
const FREQUENCY_LOG_BASE: f64 = 10.0;

/// Recency decay constant, in days.
const RECENCY_DECAY_DAYS: f64 = 7.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Fraction of the course's tags matched by the user's declared interests.
///
/// Interests and career interests are pooled and case-folded. A tag matches
/// on exact equality or symmetric substring containment, so the interest
/// "web" matches the compound tag "web-development" and vice versa. There is
/// no fuzzy matching; a course with no tags scores 0.
pub fn interest_score(profile: &UserProfile, tags: &[String]) -> f64 {
    if tags.is_empty() {
        return 0.0;
    }

    let interests: Vec<String> = profile
        .interests
        .iter()
        .chain(profile.career_interests.iter())
        .map(|interest| interest.to_lowercase())
        .collect();

    let matched = tags
        .iter()
        .filter(|tag| {
            let tag = tag.to_lowercase();
            interests
                .iter()
                .any(|interest| *interest == tag || tag.contains(interest.as_str()) || interest.contains(tag.as_str()))
        })
        .count();

    matched as f64 / tags.len() as f64
}

/// Normalized average scroll dwell time.
///
/// Linear in the mean duration up to 60 seconds, then clamped at 1. Unlike
/// view frequency this is deliberately not logarithmic: a single long
/// engagement counts heavily. Zero qualifying records score 0.
pub fn engagement_score(scroll_count: i64, scroll_duration_sum: f64) -> f64 {
    if scroll_count == 0 {
        return 0.0;
    }
    let mean = scroll_duration_sum / scroll_count as f64;
    (mean / ENGAGEMENT_SATURATION_SECS).min(1.0)
}

/// Blended view frequency and recency.
///
/// Frequency grows logarithmically and saturates near nine views; recency
/// decays exponentially with a 7-day constant, so a view seven days old
/// contributes `e^-1`. The final score is the arithmetic mean of the two
/// components. Zero view records score 0.
pub fn view_score(view_count: i64, days_since_last_view: Option<f64>) -> f64 {
    if view_count == 0 {
        return 0.0;
    }
    let Some(days) = days_since_last_view else {
        return 0.0;
    };
    (frequency_component(view_count) + recency_component(days)) / 2.0
}

pub(crate) fn frequency_component(view_count: i64) -> f64 {
    ((view_count as f64 + 1.0).ln() / FREQUENCY_LOG_BASE.ln()).min(1.0)
}

pub(crate) fn recency_component(days_since_last_view: f64) -> f64 {
    // Clock skew can put a view in the future; clamp so the signal stays <= 1.
    (-days_since_last_view.max(0.0) / RECENCY_DECAY_DAYS).exp()
}

/// Item popularity relative to the catalog maximum.
///
/// The denominator is floored at 1, so an empty or all-zero catalog yields 0
/// for every item rather than a division by zero.
pub fn popularity_score(popularity: i32, max_popularity: i32) -> f64 {
    f64::from(popularity) / f64::from(max_popularity.max(1))
}

/// Maximum popularity across the candidate set, floored at 1.
///
/// Computed once per ranking request and shared by every candidate.
pub fn max_popularity(popularities: impl IntoIterator<Item = i32>) -> i32 {
    popularities.into_iter().max().unwrap_or(0).max(1)
}

/// Fractional days elapsed between a timestamp and the reference instant.
pub fn days_since(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - timestamp).num_milliseconds() as f64 / MILLIS_PER_DAY
}
