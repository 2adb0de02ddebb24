//! Inventory Service Library
//!
//! This crate provides stock-level CRUD over HTTP with a read-through cache.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod config;
pub mod handlers;
pub mod infra;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use common::database::format_migration_status;
use common::{BoxError, Cache};
use tracing::info;

use crate::config::InventoryServiceConfig;
use crate::infra::Database;
use crate::repository::InventoryStore;
use crate::service::InventoryManager;
use crate::state::AppState;

pub use crate::routes::create_router;
pub use common::database::MigrateAction;

/// Run the inventory service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), BoxError> {
    let config = InventoryServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), BoxError> {
    let config = InventoryServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Inventory migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last inventory migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for line in format_migration_status(&status) {
                println!("{}", line);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Inventory tables reset and migrations applied");
        }
    }

    Ok(())
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: InventoryServiceConfig,
) -> Result<(), BoxError> {
    // Initialize database and cache
    let db = Database::connect(&config.database).await?;
    let cache = Cache::connect(&config.cache).await?;

    // Create repository and service
    let inventory_repo = Arc::new(InventoryStore::new(db.get_connection()));
    let inventory_service = Arc::new(InventoryManager::new(inventory_repo, cache));

    // Build router
    let state = AppState::new(inventory_service);
    let app = create_router(state, config.http.request_timeout_seconds);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Inventory service listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
