//! Cross-strategy equivalence: the row-wise and bulk execution paths must
//! produce the same ordered results for the same fixture data.

use std::sync::Arc;

use compass_api::models::ScoredCourse;
use compass_api::services::{RecommendationService, Strategy};

mod common;

use common::{course, days_ago, scroll, user, view, InMemoryStore};

/// A catalog with uneven interaction histories across three users.
fn fixture_store() -> InMemoryStore {
    InMemoryStore {
        users: vec![
            user(1, &["javascript", "web"], &["frontend-developer"]),
            user(2, &["data-science", "python"], &["ml-engineer"]),
            user(3, &[], &[]),
        ],
        courses: vec![
            course(1, "JavaScript Basics", "Programming", &["javascript", "programming"], 95, 500),
            course(2, "Advanced CSS", "Design", &["css", "web-design"], 80, 300),
            course(3, "Data Science Intro", "Data", &["python", "data-science"], 100, 800),
            course(4, "Web Development Bootcamp", "Programming", &["web-development", "javascript"], 60, 200),
            course(5, "Untagged Course", "Misc", &[], 40, 50),
            course(6, "Machine Learning", "Data", &["machine-learning", "python"], 88, 600),
        ],
        interactions: vec![
            // User 1: heavy on course 1, stale views on course 2.
            view(1, 1, days_ago(1)),
            view(1, 1, days_ago(3)),
            view(1, 1, days_ago(5)),
            scroll(1, 1, Some(30), days_ago(2)),
            scroll(1, 1, Some(90), days_ago(2)),
            view(1, 2, days_ago(20)),
            scroll(1, 2, Some(5), days_ago(20)),
            // Durationless scroll must be ignored by both paths.
            scroll(1, 4, None, days_ago(1)),
            // User 2: spread across the data courses.
            view(2, 3, days_ago(0)),
            view(2, 3, days_ago(1)),
            view(2, 3, days_ago(2)),
            view(2, 3, days_ago(4)),
            scroll(2, 3, Some(120), days_ago(1)),
            view(2, 6, days_ago(7)),
            scroll(2, 6, Some(45), days_ago(7)),
            scroll(2, 6, Some(15), days_ago(8)),
            view(2, 1, days_ago(14)),
        ],
        // User 3 has no history at all.
    }
}

fn ids(items: &[ScoredCourse]) -> Vec<i64> {
    items.iter().map(|item| item.course.id).collect()
}

fn assert_equivalent(row_wise: &[ScoredCourse], bulk: &[ScoredCourse]) {
    assert_eq!(ids(row_wise), ids(bulk), "strategies disagree on order");
    for (a, b) in row_wise.iter().zip(bulk) {
        assert!(
            (a.recommendation_score - b.recommendation_score).abs() < 1e-3,
            "total diverged for course {}: {} vs {}",
            a.course.id,
            a.recommendation_score,
            b.recommendation_score
        );
        assert!((a.score_breakdown.interest - b.score_breakdown.interest).abs() < 1e-3);
        assert!((a.score_breakdown.engagement - b.score_breakdown.engagement).abs() < 1e-3);
        assert!((a.score_breakdown.views - b.score_breakdown.views).abs() < 1e-3);
        assert!((a.score_breakdown.popularity - b.score_breakdown.popularity).abs() < 1e-3);
    }
}

#[tokio::test]
async fn strategies_agree_for_every_fixture_user() {
    let service = RecommendationService::new(Arc::new(fixture_store()));

    for user_id in [1, 2, 3] {
        let row_wise = service
            .rank(user_id, 10, Strategy::RowWise)
            .await
            .unwrap();
        let bulk = service.rank(user_id, 10, Strategy::Bulk).await.unwrap();

        assert_eq!(row_wise.len(), 6);
        assert_equivalent(&row_wise, &bulk);
    }
}

#[tokio::test]
async fn strategies_agree_after_truncation() {
    let service = RecommendationService::new(Arc::new(fixture_store()));

    let row_wise = service.rank(1, 3, Strategy::RowWise).await.unwrap();
    let bulk = service.rank(1, 3, Strategy::Bulk).await.unwrap();

    assert_eq!(row_wise.len(), 3);
    assert_equivalent(&row_wise, &bulk);
}

#[tokio::test]
async fn no_history_user_ranks_by_interest_and_popularity_in_both_paths() {
    let service = RecommendationService::new(Arc::new(fixture_store()));

    let row_wise = service.rank(3, 10, Strategy::RowWise).await.unwrap();
    let bulk = service.rank(3, 10, Strategy::Bulk).await.unwrap();

    assert_equivalent(&row_wise, &bulk);
    for item in &row_wise {
        assert_eq!(item.score_breakdown.engagement, 0.0);
        assert_eq!(item.score_breakdown.views, 0.0);
    }
    // No interests either, so popularity decides: course 3 has the max.
    assert_eq!(row_wise[0].course.id, 3);
}
