//! Application state for dependency injection.

use std::sync::Arc;

use crate::service::ProductService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
}

impl AppState {
    /// Create new app state.
    pub fn new(product_service: Arc<dyn ProductService>) -> Self {
        Self { product_service }
    }
}
