//! The external collaborator boundary.
//!
//! The scoring engine only ever reads: user profiles, the candidate set and
//! interaction data. [`CourseStore`] is the seam those reads go through, so
//! the engine can run against Postgres in production and against in-memory
//! fixtures or mocks in tests.

pub mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Course, InteractionAggregate, InteractionRecord, UserProfile};

pub use postgres::PgCourseStore;

/// Read-only access to users, courses and interaction history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Fetches a user's declared interest profile, if one exists.
    async fn user_profile(&self, user_id: i64) -> AppResult<Option<UserProfile>>;

    /// Fetches the full candidate set.
    async fn list_courses(&self) -> AppResult<Vec<Course>>;

    /// Fetches the courses in a category, matched case-insensitively.
    async fn courses_in_category(&self, category: &str) -> AppResult<Vec<Course>>;

    /// Fetches courses ordered by (popularity desc, enrollment desc).
    async fn popular_courses(&self, limit: usize) -> AppResult<Vec<Course>>;

    /// Fetches all interaction records for one (user, course) pair.
    ///
    /// Used by the row-wise strategy, which aggregates in-process.
    async fn interactions(&self, user_id: i64, course_id: i64)
        -> AppResult<Vec<InteractionRecord>>;

    /// Fetches pre-aggregated interaction statistics for every course the
    /// user has touched, in a single pass.
    ///
    /// Used by the bulk strategy; courses absent from the map have no
    /// recorded interactions.
    async fn interaction_aggregates(
        &self,
        user_id: i64,
    ) -> AppResult<HashMap<i64, InteractionAggregate>>;
}
