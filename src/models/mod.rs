use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A course in the catalog, as served to clients.
///
/// `popularity` is a non-negative global counter maintained outside this
/// service; `enrollment_count` is informational and never enters scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub difficulty: String,
    pub popularity: i32,
    pub enrollment_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Declared interests for a user. Immutable for the duration of one
/// ranking request; tag order carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub interests: Vec<String>,
    pub career_interests: Vec<String>,
}

/// Kind of logged user/course event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    View,
    Scroll,
}

/// One logged user/course event.
///
/// Scroll records without a duration are invalid for engagement purposes
/// and are excluded from aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub user_id: i64,
    pub course_id: i64,
    pub kind: ActivityKind,
    pub duration_secs: Option<i32>,
    pub timestamp: DateTime<Utc>,
}

/// Per-course interaction statistics for one user.
///
/// This is the shape both execution strategies score from: the bulk path
/// receives it straight from a GROUP BY query, the row-wise path folds it
/// from raw records with [`InteractionAggregate::from_records`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionAggregate {
    pub view_count: i64,
    pub last_view: Option<DateTime<Utc>>,
    pub scroll_count: i64,
    pub scroll_duration_sum: f64,
}

impl InteractionAggregate {
    /// Folds raw interaction records into per-course statistics.
    ///
    /// Views contribute a count and the most recent timestamp; scrolls
    /// contribute a duration sum and count, skipping records with no
    /// duration.
    pub fn from_records(records: &[InteractionRecord]) -> Self {
        let mut agg = Self::default();
        for record in records {
            match record.kind {
                ActivityKind::View => {
                    agg.view_count += 1;
                    agg.last_view = match agg.last_view {
                        Some(ts) if ts >= record.timestamp => Some(ts),
                        _ => Some(record.timestamp),
                    };
                }
                ActivityKind::Scroll => {
                    if let Some(duration) = record.duration_secs {
                        agg.scroll_count += 1;
                        agg.scroll_duration_sum += f64::from(duration);
                    }
                }
            }
        }
        agg
    }
}

/// Per-signal components reported alongside the total score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub interest: f64,
    pub engagement: f64,
    pub views: f64,
    pub popularity: f64,
}

/// A course with its recommendation score and breakdown, rounded to two
/// decimals for presentation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCourse {
    #[serde(flatten)]
    pub course: Course,
    pub recommendation_score: f64,
    pub score_breakdown: ScoreBreakdown,
}

/// A course with its category-scoped interest match.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScoredCourse {
    #[serde(flatten)]
    pub course: Course,
    pub interest_match: f64,
}

// ============================================================================
// API response shapes
// ============================================================================

/// Response for the personalized ranking endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    pub recommendations: Vec<ScoredCourse>,
    pub user_id: i64,
    pub algorithm: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Response for the popularity fallback endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularCoursesResponse {
    pub courses: Vec<Course>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Response for the category-scoped endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecommendationsResponse {
    pub courses: Vec<CategoryScoredCourse>,
    pub category: String,
    pub personalized: bool,
    pub timestamp: DateTime<Utc>,
}
