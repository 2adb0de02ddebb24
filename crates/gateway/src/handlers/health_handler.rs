//! Health check handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use domain::{SERVICE_GATEWAY, STATUS_HEALTHY, STATUS_UNHEALTHY};

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub downstream_services: DownstreamStatus,
}

/// Reachability of each backing service.
#[derive(Debug, Serialize)]
pub struct DownstreamStatus {
    pub product_service: &'static str,
    pub inventory_service: &'static str,
}

fn label(healthy: bool) -> &'static str {
    if healthy {
        STATUS_HEALTHY
    } else {
        STATUS_UNHEALTHY
    }
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint. The gateway itself is up whenever it answers;
/// downstream services are reported individually.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (product_ok, inventory_ok) = tokio::join!(
        state.product_client.is_healthy(),
        state.inventory_client.is_healthy()
    );

    Json(HealthResponse {
        status: STATUS_HEALTHY,
        service: SERVICE_GATEWAY,
        downstream_services: DownstreamStatus {
            product_service: label(product_ok),
            inventory_service: label(inventory_ok),
        },
    })
}
