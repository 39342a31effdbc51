//! In-memory `CourseStore` fixtures shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use compass_api::error::AppResult;
use compass_api::models::{
    ActivityKind, Course, InteractionAggregate, InteractionRecord, UserProfile,
};
use compass_api::store::CourseStore;

/// Fixture store holding everything in memory.
///
/// `interaction_aggregates` performs its own set-oriented grouping, mirroring
/// what the Postgres store does with GROUP BY, so the equivalence tests
/// genuinely exercise two aggregation paths.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    pub users: Vec<UserProfile>,
    pub courses: Vec<Course>,
    pub interactions: Vec<InteractionRecord>,
}

#[async_trait]
impl CourseStore for InMemoryStore {
    async fn user_profile(&self, user_id: i64) -> AppResult<Option<UserProfile>> {
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        Ok(self.courses.clone())
    }

    async fn courses_in_category(&self, category: &str) -> AppResult<Vec<Course>> {
        let mut courses: Vec<Course> = self
            .courses
            .iter()
            .filter(|c| c.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.popularity.cmp(&a.popularity).then_with(|| a.id.cmp(&b.id)));
        Ok(courses)
    }

    async fn popular_courses(&self, limit: usize) -> AppResult<Vec<Course>> {
        let mut courses = self.courses.clone();
        courses.sort_by(|a, b| {
            b.popularity
                .cmp(&a.popularity)
                .then_with(|| b.enrollment_count.cmp(&a.enrollment_count))
                .then_with(|| a.id.cmp(&b.id))
        });
        courses.truncate(limit);
        Ok(courses)
    }

    async fn interactions(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> AppResult<Vec<InteractionRecord>> {
        Ok(self
            .interactions
            .iter()
            .filter(|r| r.user_id == user_id && r.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn interaction_aggregates(
        &self,
        user_id: i64,
    ) -> AppResult<HashMap<i64, InteractionAggregate>> {
        let mut aggregates: HashMap<i64, InteractionAggregate> = HashMap::new();
        for record in self.interactions.iter().filter(|r| r.user_id == user_id) {
            let agg = aggregates.entry(record.course_id).or_default();
            match record.kind {
                ActivityKind::View => {
                    agg.view_count += 1;
                    if agg.last_view.map_or(true, |ts| ts < record.timestamp) {
                        agg.last_view = Some(record.timestamp);
                    }
                }
                ActivityKind::Scroll => {
                    if let Some(duration) = record.duration_secs {
                        agg.scroll_count += 1;
                        agg.scroll_duration_sum += f64::from(duration);
                    }
                }
            }
        }
        Ok(aggregates)
    }
}

pub fn user(id: i64, interests: &[&str], career_interests: &[&str]) -> UserProfile {
    UserProfile {
        id,
        interests: interests.iter().map(|s| s.to_string()).collect(),
        career_interests: career_interests.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn course(
    id: i64,
    title: &str,
    category: &str,
    tags: &[&str],
    popularity: i32,
    enrollment_count: i32,
) -> Course {
    Course {
        id,
        title: title.to_string(),
        description: format!("{title} description"),
        category: category.to_string(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        difficulty: "beginner".to_string(),
        popularity,
        enrollment_count,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

pub fn view(user_id: i64, course_id: i64, timestamp: DateTime<Utc>) -> InteractionRecord {
    InteractionRecord {
        user_id,
        course_id,
        kind: ActivityKind::View,
        duration_secs: None,
        timestamp,
    }
}

pub fn scroll(
    user_id: i64,
    course_id: i64,
    duration_secs: Option<i32>,
    timestamp: DateTime<Utc>,
) -> InteractionRecord {
    InteractionRecord {
        user_id,
        course_id,
        kind: ActivityKind::Scroll,
        duration_secs,
        timestamp,
    }
}

/// A small catalog with one active user, used by the router tests.
pub fn seeded_store() -> InMemoryStore {
    InMemoryStore {
        users: vec![user(1, &["javascript", "web"], &["frontend-developer"])],
        courses: vec![
            course(
                1,
                "JavaScript Basics",
                "Programming",
                &["javascript", "programming"],
                95,
                500,
            ),
            course(2, "Advanced CSS", "Design", &["css", "web-design"], 80, 300),
            course(
                3,
                "Data Science Intro",
                "Data",
                &["python", "data-science"],
                100,
                800,
            ),
            course(
                4,
                "Web Development Bootcamp",
                "Programming",
                &["web-development", "javascript"],
                60,
                200,
            ),
        ],
        interactions: vec![
            view(1, 1, days_ago(3)),
            view(1, 1, days_ago(1)),
            scroll(1, 1, Some(30), days_ago(2)),
            scroll(1, 1, Some(90), days_ago(2)),
        ],
    }
}
