//! Route definitions

use super::handlers;
use super::request_id::propagate_request_id;
use super::state::AppState;
use axum::{http::Method, middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        // Search API
        .route("/api/v1/search", get(handlers::search))
        .route("/api/v1/search/", get(handlers::search))
        .route("/api/v1/search/:backend", get(handlers::search_backend))
        // Health
        .route("/health", get(handlers::health))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(propagate_request_id))
        .layer(cors)
        // Add state
        .with_state(state)
}
