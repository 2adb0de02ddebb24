//! Application state for dependency injection.

use std::sync::Arc;

use crate::aggregator::ProductAggregator;
use crate::clients::ServiceClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub product_client: Arc<ServiceClient>,
    pub inventory_client: Arc<ServiceClient>,
    pub aggregator: Arc<ProductAggregator>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        product_client: Arc<ServiceClient>,
        inventory_client: Arc<ServiceClient>,
        aggregator: Arc<ProductAggregator>,
    ) -> Self {
        Self {
            product_client,
            inventory_client,
            aggregator,
        }
    }
}
