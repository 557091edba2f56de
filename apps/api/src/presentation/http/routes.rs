use super::{
    handlers::{catalog, health, reviews},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, StatusCode, header},
    middleware,
    routing::{MethodRouter, get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Path the deployed review form posts to.
pub const LEGACY_SUBMIT_PATH: &str = "/.netlify/functions/submit-review";

fn submit_route() -> MethodRouter<AppState> {
    post(reviews::submit_review)
        .options(|| async { StatusCode::OK })
        .fallback(reviews::method_not_allowed)
}

pub fn create_router(state: AppState) -> Router {
    // The review form is a static page served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let body_limit = state.config.max_body_bytes;

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Catalog
        .route("/api/v1/catalog", get(catalog::get_catalog))
        .route("/api/v1/catalog/{slug}", get(catalog::get_category))
        // Submissions
        .route("/api/v1/reviews", submit_route())
        .route(LEGACY_SUBMIT_PATH, submit_route())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}
