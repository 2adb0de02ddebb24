//! Typed views of the backing services used by the aggregator.

use async_trait::async_trait;

use common::AppResult;
use domain::{InventorySummary, Product};

#[cfg(test)]
use mockall::automock;

use super::ServiceClient;

/// Read access to the product catalog.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_product(&self, id: i32) -> AppResult<Product>;

    async fn list_products(&self) -> AppResult<Vec<Product>>;
}

/// Stock lookup for a single product.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InventoryLookup: Send + Sync {
    async fn inventory_for_product(&self, product_id: i32) -> AppResult<InventorySummary>;
}

#[async_trait]
impl ProductCatalog for ServiceClient {
    async fn get_product(&self, id: i32) -> AppResult<Product> {
        self.get_json(&format!("/products/{}", id)).await
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.get_json("/products").await
    }
}

#[async_trait]
impl InventoryLookup for ServiceClient {
    async fn inventory_for_product(&self, product_id: i32) -> AppResult<InventorySummary> {
        // Only quantity and warehouse are kept from the inventory row
        self.get_json(&format!("/inventory/product/{}", product_id))
            .await
    }
}
