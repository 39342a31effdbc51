use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::CacheKey;
use crate::error::AppResult;
use crate::middleware::request_id::RequestId;
use crate::models::{
    CategoryRecommendationsResponse, Course, PopularCoursesResponse, RecommendationsResponse,
};
use crate::scoring::ranker::{
    normalize_limit, DEFAULT_CATEGORY_LIMIT, DEFAULT_POPULAR_LIMIT, DEFAULT_RECOMMENDATION_LIMIT,
};
use crate::services::Strategy;

use super::AppState;

/// TTL for the cached popular listing, in seconds.
const POPULAR_CACHE_TTL: u64 = 300;

// Query parameters arrive as raw strings so malformed values can fall back
// to defaults instead of rejecting the request.

#[derive(Debug, Deserialize)]
pub struct RankQuery {
    limit: Option<String>,
    bulk: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    limit: Option<String>,
    user_id: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "timestamp": Utc::now() })),
    )
}

/// Personalized top-N recommendations for a user.
///
/// `bulk=true` selects the set-oriented aggregation strategy; both
/// strategies produce equivalent rankings.
pub async fn recommendations_for_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<i64>,
    Query(params): Query<RankQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    let limit = normalize_limit(params.limit.as_deref(), DEFAULT_RECOMMENDATION_LIMIT);
    let strategy = if params.bulk.as_deref() == Some("true") {
        Strategy::Bulk
    } else {
        Strategy::RowWise
    };

    tracing::info!(
        request_id = %request_id,
        user_id,
        limit,
        strategy = strategy.as_str(),
        "Processing recommendation request"
    );

    let recommendations = state.recommendations.rank(user_id, limit, strategy).await?;

    Ok(Json(RecommendationsResponse {
        recommendations,
        user_id,
        algorithm: strategy.as_str(),
        timestamp: Utc::now(),
    }))
}

/// Popular courses, the fallback for users without profiles.
pub async fn popular_courses(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> AppResult<Json<PopularCoursesResponse>> {
    let limit = normalize_limit(params.limit.as_deref(), DEFAULT_POPULAR_LIMIT);
    let key = CacheKey::PopularCourses(limit);

    if let Some(cache) = &state.cache {
        match cache.get_json::<Vec<Course>>(&key).await {
            Ok(Some(courses)) => return Ok(Json(popular_response(courses))),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Popular cache read failed"),
        }
    }

    let courses = state.recommendations.popular(limit).await?;

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set_json(&key, &courses, POPULAR_CACHE_TTL).await {
            tracing::warn!(error = %e, "Popular cache write failed");
        }
    }

    Ok(Json(popular_response(courses)))
}

fn popular_response(courses: Vec<Course>) -> PopularCoursesResponse {
    PopularCoursesResponse {
        courses,
        kind: "popular",
        timestamp: Utc::now(),
    }
}

/// Category-scoped recommendations, personalized when a user is supplied.
pub async fn category_recommendations(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<CategoryQuery>,
) -> AppResult<Json<CategoryRecommendationsResponse>> {
    let limit = normalize_limit(params.limit.as_deref(), DEFAULT_CATEGORY_LIMIT);
    let user_id = params.user_id.as_deref().and_then(|v| v.parse::<i64>().ok());

    let (courses, personalized) = state
        .recommendations
        .recommend_by_category(&category, user_id, limit)
        .await?;

    Ok(Json(CategoryRecommendationsResponse {
        courses,
        category,
        personalized,
        timestamp: Utc::now(),
    }))
}
