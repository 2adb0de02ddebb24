//! Application state for dependency injection.

use std::sync::Arc;

use crate::service::InventoryService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub inventory_service: Arc<dyn InventoryService>,
}

impl AppState {
    /// Create new app state.
    pub fn new(inventory_service: Arc<dyn InventoryService>) -> Self {
        Self { inventory_service }
    }
}
