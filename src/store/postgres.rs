//! Postgres-backed [`CourseStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;
use crate::models::{
    ActivityKind, Course, InteractionAggregate, InteractionRecord, UserProfile,
};
use crate::store::CourseStore;

const COURSE_COLUMNS: &str =
    "id, title, description, category, tags, difficulty, popularity, enrollment_count, created_at";

/// Course store reading from the shared Postgres schema.
pub struct PgCourseStore {
    pool: PgPool,
}

impl PgCourseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InteractionRow {
    user_id: i64,
    course_id: i64,
    activity_type: String,
    duration: Option<i32>,
    timestamp: DateTime<Utc>,
}

impl InteractionRow {
    /// Maps a raw activity row to a record, skipping unknown activity types.
    fn into_record(self) -> Option<InteractionRecord> {
        let kind = match self.activity_type.as_str() {
            "view" => ActivityKind::View,
            "scroll" => ActivityKind::Scroll,
            other => {
                tracing::warn!(activity_type = %other, "Unknown activity type, skipping row");
                return None;
            }
        };
        Some(InteractionRecord {
            user_id: self.user_id,
            course_id: self.course_id,
            kind,
            duration_secs: self.duration,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Debug, FromRow)]
struct AggregateRow {
    course_id: i64,
    view_count: i64,
    last_view: Option<DateTime<Utc>>,
    scroll_count: i64,
    scroll_duration_sum: f64,
}

#[async_trait]
impl CourseStore for PgCourseStore {
    async fn user_profile(&self, user_id: i64) -> AppResult<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT id, interests, career_interests FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    async fn courses_in_category(&self, category: &str) -> AppResult<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses \
             WHERE LOWER(category) = LOWER($1) \
             ORDER BY popularity DESC, id ASC"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    async fn popular_courses(&self, limit: usize) -> AppResult<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses \
             ORDER BY popularity DESC, enrollment_count DESC, id ASC \
             LIMIT $1"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    async fn interactions(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> AppResult<Vec<InteractionRecord>> {
        let rows = sqlx::query_as::<_, InteractionRow>(
            "SELECT user_id, course_id, activity_type, duration, timestamp \
             FROM user_activities \
             WHERE user_id = $1 AND course_id = $2 \
             ORDER BY timestamp DESC",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(InteractionRow::into_record).collect())
    }

    async fn interaction_aggregates(
        &self,
        user_id: i64,
    ) -> AppResult<HashMap<i64, InteractionAggregate>> {
        // One set-oriented pass per user instead of one query per course.
        // The FILTER clauses mirror InteractionAggregate::from_records, so
        // both execution strategies score from identical statistics.
        let rows = sqlx::query_as::<_, AggregateRow>(
            "SELECT course_id, \
                    COUNT(*) FILTER (WHERE activity_type = 'view') AS view_count, \
                    MAX(timestamp) FILTER (WHERE activity_type = 'view') AS last_view, \
                    COUNT(*) FILTER (WHERE activity_type = 'scroll' AND duration IS NOT NULL) AS scroll_count, \
                    COALESCE(SUM(duration) FILTER (WHERE activity_type = 'scroll' AND duration IS NOT NULL), 0)::float8 AS scroll_duration_sum \
             FROM user_activities \
             WHERE user_id = $1 \
             GROUP BY course_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.course_id,
                    InteractionAggregate {
                        view_count: row.view_count,
                        last_view: row.last_view,
                        scroll_count: row.scroll_count,
                        scroll_duration_sum: row.scroll_duration_sum,
                    },
                )
            })
            .collect())
    }
}
