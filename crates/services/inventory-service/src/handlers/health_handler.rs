//! Health check handler.

use axum::{extract::State, routing::get, Router};

use common::HealthResponse;
use domain::SERVICE_INVENTORY;

use crate::state::AppState;

/// Create health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - probes the database and the cache.
pub async fn health_check(State(state): State<AppState>) -> HealthResponse {
    let checks = state.inventory_service.health().await;
    HealthResponse::new(SERVICE_INVENTORY, checks)
}
