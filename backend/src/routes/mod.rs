//! Route definitions for the Fitness Tracker API
//!
//! Every `/api/v1` route requires a bearer token; handlers scope all reads
//! and writes to the token's owner.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod goals;
mod health;
mod nutrition;
mod progress;
mod saved_meals;
mod sessions;
mod templates;
mod weight;

#[cfg(test)]
mod progress_tests;

pub use goals::goal_routes;
pub use nutrition::nutrition_routes;
pub use progress::progress_routes;
pub use saved_meals::saved_meal_routes;
pub use sessions::session_routes;
pub use templates::template_routes;
pub use weight::weight_routes;

/// Largest accepted JSON body; a finished session is the biggest payload
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Fitness Tracker API v1" }))
        .nest("/weight", weight_routes())
        .nest("/nutrition", nutrition_routes())
        .nest("/saved-meals", saved_meal_routes())
        .nest("/templates", template_routes())
        .nest("/sessions", session_routes())
        .nest("/goals", goal_routes())
        .nest("/progress", progress_routes())
}
