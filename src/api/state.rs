use std::sync::Arc;

use crate::db::Cache;
use crate::services::RecommendationService;
use crate::store::CourseStore;

/// Shared application state
///
/// The cache is optional: integration tests run the router without Redis,
/// and cache failures never fail a request.
#[derive(Clone)]
pub struct AppState {
    pub recommendations: Arc<RecommendationService>,
    pub cache: Option<Cache>,
}

impl AppState {
    pub fn new(store: Arc<dyn CourseStore>, cache: Option<Cache>) -> Self {
        Self {
            recommendations: Arc::new(RecommendationService::new(store)),
            cache,
        }
    }
}
