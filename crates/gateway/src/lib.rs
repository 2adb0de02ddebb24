//! API Gateway Library
//!
//! This crate provides the public HTTP API: CRUD requests are relayed to the
//! product and inventory services, and product views are aggregated from
//! both behind the shared cache.

pub mod aggregator;
pub mod clients;
pub mod config;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use common::{BoxError, Cache};
use domain::{SERVICE_INVENTORY, SERVICE_PRODUCT};
use tracing::info;

use crate::aggregator::ProductAggregator;
use crate::clients::{build_http_client, ServiceClient};
use crate::config::GatewayConfig;
use crate::state::AppState;

pub use crate::routes::create_router;

/// Run the gateway as an embedded component (for combined binary).
pub async fn run_embedded(
    host: &str,
    port: u16,
    product_port: u16,
    inventory_port: u16,
) -> Result<(), BoxError> {
    let mut config = GatewayConfig::from_env();
    config.product_service_url = format!("http://127.0.0.1:{}", product_port);
    config.inventory_service_url = format!("http://127.0.0.1:{}", inventory_port);

    run_server_with_config(host, port, config).await
}

/// Run the gateway standalone with configuration from the environment.
pub async fn run_standalone(host: &str, port: u16) -> Result<(), BoxError> {
    run_server_with_config(host, port, GatewayConfig::from_env()).await
}

/// Wire clients, cache and aggregator into the application state.
pub fn build_state(config: &GatewayConfig, cache: Cache) -> Result<AppState, BoxError> {
    let http = build_http_client(config.upstream_timeout_seconds)?;

    let product_client = Arc::new(ServiceClient::new(
        SERVICE_PRODUCT,
        config.product_service_url.clone(),
        http.clone(),
    ));
    let inventory_client = Arc::new(ServiceClient::new(
        SERVICE_INVENTORY,
        config.inventory_service_url.clone(),
        http,
    ));

    let aggregator = Arc::new(ProductAggregator::new(
        product_client.clone(),
        inventory_client.clone(),
        cache,
        config.aggregate_concurrency,
    ));

    Ok(AppState::new(product_client, inventory_client, aggregator))
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: GatewayConfig,
) -> Result<(), BoxError> {
    let cache = Cache::connect(&config.cache).await?;
    let state = build_state(&config, cache)?;

    info!(
        product_service = %config.product_service_url,
        inventory_service = %config.inventory_service_url,
        "Upstream services configured"
    );

    // Build router
    let app = create_router(state, config.http.request_timeout_seconds);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
