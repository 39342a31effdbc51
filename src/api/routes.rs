use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/recommendations", recommendation_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/user/:user_id", get(handlers::recommendations_for_user))
        .route("/popular", get(handlers::popular_courses))
        .route("/category/:category", get(handlers::category_recommendations))
}
