//! Personalized course ranking.
//!
//! [`RecommendationService::rank`] supports two execution strategies with
//! equivalent results: the row-wise strategy fetches each candidate's raw
//! interaction history and aggregates in-process, while the bulk strategy
//! pulls pre-aggregated statistics for the whole candidate set in one
//! store query. Both feed the same pure scoring functions.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::models::{
    CategoryScoredCourse, Course, InteractionAggregate, ScoreBreakdown, ScoredCourse, UserProfile,
};
use crate::scoring::aggregate::round2;
use crate::scoring::ranker;
use crate::scoring::{score_candidate, signals, ScoredCandidate};
use crate::store::CourseStore;

/// Which execution strategy computes the signal inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Per-candidate interaction fetches, aggregated in-process.
    RowWise,
    /// One set-oriented aggregate query for the whole candidate set.
    Bulk,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::RowWise => "row-wise",
            Strategy::Bulk => "bulk",
        }
    }
}

/// The ranking engine. Stateless between requests; every call works on a
/// fresh snapshot of profile, candidates and interaction history.
pub struct RecommendationService {
    store: Arc<dyn CourseStore>,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    /// Produces the top `limit` courses for a user, ordered by total score.
    ///
    /// Fails with [`AppError::NotFound`] when no profile exists for the
    /// user. An empty catalog yields an empty list, and users with no
    /// interaction history still get results ranked by interest and
    /// popularity alone.
    pub async fn rank(
        &self,
        user_id: i64,
        limit: usize,
        strategy: Strategy,
    ) -> AppResult<Vec<ScoredCourse>> {
        let profile = self
            .store
            .user_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let courses = self.store.list_courses().await?;
        if courses.is_empty() {
            return Ok(vec![]);
        }

        // Shared by every candidate; computed once from the fetched set.
        let max_popularity = signals::max_popularity(courses.iter().map(|c| c.popularity));

        let candidates = match strategy {
            Strategy::Bulk => {
                self.score_from_aggregates(&profile, courses, max_popularity)
                    .await?
            }
            Strategy::RowWise => {
                self.score_row_wise(profile.clone(), courses, max_popularity)
                    .await?
            }
        };

        let ranked = ranker::rank(retain_finite(candidates), limit);

        tracing::debug!(
            user_id,
            returned = ranked.len(),
            strategy = strategy.as_str(),
            "Ranking complete"
        );

        Ok(ranked.into_iter().map(present).collect())
    }

    /// Bulk strategy: one aggregate fetch, then pure in-memory scoring.
    async fn score_from_aggregates(
        &self,
        profile: &UserProfile,
        courses: Vec<Course>,
        max_popularity: i32,
    ) -> AppResult<Vec<ScoredCandidate>> {
        let aggregates: HashMap<i64, InteractionAggregate> =
            self.store.interaction_aggregates(profile.id).await?;
        let now = Utc::now();

        Ok(courses
            .into_iter()
            .map(|course| {
                let stats = aggregates.get(&course.id).cloned().unwrap_or_default();
                score_candidate(profile, course, &stats, max_popularity, now)
            })
            .collect())
    }

    /// Row-wise strategy: per-candidate interaction fetches fanned out as
    /// concurrent tasks, each aggregated in-process.
    async fn score_row_wise(
        &self,
        profile: UserProfile,
        courses: Vec<Course>,
        max_popularity: i32,
    ) -> AppResult<Vec<ScoredCandidate>> {
        let profile = Arc::new(profile);
        let now = Utc::now();

        let mut tasks = Vec::with_capacity(courses.len());
        for course in courses {
            let store = Arc::clone(&self.store);
            let profile = Arc::clone(&profile);
            tasks.push(tokio::spawn(async move {
                let records = store.interactions(profile.id, course.id).await?;
                let stats = InteractionAggregate::from_records(&records);
                Ok::<_, AppError>(score_candidate(&profile, course, &stats, max_popularity, now))
            }));
        }

        let mut candidates = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(Ok(candidate)) => candidates.push(candidate),
                // A store failure is systemic: fail the whole request rather
                // than returning a partially scored list.
                Ok(Err(e)) => return Err(e),
                Err(e) => return Err(AppError::Internal(e.to_string())),
            }
        }

        Ok(candidates)
    }

    /// Popularity fallback: no per-user signals, for brand-new users or a
    /// default landing list.
    pub async fn popular(&self, limit: usize) -> AppResult<Vec<Course>> {
        self.store.popular_courses(limit).await
    }

    /// Category-scoped ranking: a lighter-weight relevance pass.
    ///
    /// Filters to the category, then orders by the interest signal alone
    /// (not the full aggregator), tie-broken by popularity. Without a
    /// resolvable user profile the courses keep their popularity order.
    /// Fails with [`AppError::NotFound`] when the category has no courses.
    pub async fn recommend_by_category(
        &self,
        category: &str,
        user_id: Option<i64>,
        limit: usize,
    ) -> AppResult<(Vec<CategoryScoredCourse>, bool)> {
        let courses = self.store.courses_in_category(category).await?;
        if courses.is_empty() {
            return Err(AppError::NotFound(format!(
                "No courses found in category {}",
                category
            )));
        }

        let profile = match user_id {
            Some(id) => self.store.user_profile(id).await?,
            None => None,
        };

        let Some(profile) = profile else {
            let courses = courses
                .into_iter()
                .take(limit)
                .map(|course| CategoryScoredCourse {
                    interest_match: 0.0,
                    course,
                })
                .collect();
            return Ok((courses, false));
        };

        let mut scored: Vec<(f64, Course)> = courses
            .into_iter()
            .map(|course| (signals::interest_score(&profile, &course.tags), course))
            .collect();

        scored.sort_by(|a, b| {
            b.0.total_cmp(&a.0)
                .then_with(|| b.1.popularity.cmp(&a.1.popularity))
                .then_with(|| a.1.id.cmp(&b.1.id))
        });
        scored.truncate(limit);

        let courses = scored
            .into_iter()
            .map(|(interest_match, course)| CategoryScoredCourse {
                interest_match: round2(interest_match),
                course,
            })
            .collect();

        Ok((courses, true))
    }
}

/// Drops candidates whose score came out non-finite.
///
/// Malformed data for one course must not abort the whole request; the
/// candidate is excluded and logged instead.
fn retain_finite(mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    candidates.retain(|candidate| {
        if candidate.total.is_finite() {
            true
        } else {
            tracing::warn!(
                course_id = candidate.course.id,
                "Non-finite score, excluding candidate"
            );
            false
        }
    });
    candidates
}

/// Converts a full-precision candidate into the presentation shape.
fn present(candidate: ScoredCandidate) -> ScoredCourse {
    ScoredCourse {
        recommendation_score: round2(candidate.total),
        score_breakdown: ScoreBreakdown {
            interest: round2(candidate.breakdown.interest),
            engagement: round2(candidate.breakdown.engagement),
            views: round2(candidate.breakdown.views),
            popularity: round2(candidate.breakdown.popularity),
        },
        course: candidate.course,
    }
}
