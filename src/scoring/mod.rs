//! The scoring and ranking core.
//!
//! Four independent signal extractors ([`signals`]), a fixed-weight
//! aggregator ([`aggregate`]) and the selection policy ([`ranker`]).
//! Everything here is pure and synchronous: both execution strategies
//! (row-wise and bulk) reduce their inputs to an [`InteractionAggregate`]
//! per course and run the identical math below, which is what makes their
//! rankings equivalent by construction.

pub mod aggregate;
pub mod ranker;
pub mod signals;

use chrono::{DateTime, Utc};

use crate::models::{Course, InteractionAggregate, ScoreBreakdown, UserProfile};

/// A candidate course with its full-precision total and breakdown.
///
/// Rounding to two decimals happens only at the presentation boundary.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub course: Course,
    pub total: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scores one candidate course for one user.
///
/// `max_popularity` is shared by every candidate in the request and must be
/// computed once from the full candidate set. `now` is the request's single
/// reference instant for recency decay.
pub fn score_candidate(
    profile: &UserProfile,
    course: Course,
    stats: &InteractionAggregate,
    max_popularity: i32,
    now: DateTime<Utc>,
) -> ScoredCandidate {
    let interest = signals::interest_score(profile, &course.tags);
    let engagement = signals::engagement_score(stats.scroll_count, stats.scroll_duration_sum);
    let views = signals::view_score(
        stats.view_count,
        stats.last_view.map(|ts| signals::days_since(ts, now)),
    );
    let popularity = signals::popularity_score(course.popularity, max_popularity);

    let total = aggregate::aggregate_score(interest, engagement, views, popularity);

    ScoredCandidate {
        course,
        total,
        breakdown: ScoreBreakdown {
            interest,
            engagement,
            views,
            popularity,
        },
    }
}
