//! Route configuration.

use axum::Router;
use tower_http::trace::TraceLayer;

use common::middleware::{cors_layer, timeout_layer};

use crate::handlers::{health_routes, inventory_routes};
use crate::state::AppState;

/// Create the main router with all routes and layers.
pub fn create_router(state: AppState, request_timeout_seconds: u64) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/inventory", inventory_routes())
        .with_state(state)
        .layer(timeout_layer(request_timeout_seconds))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
