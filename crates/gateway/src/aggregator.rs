//! Product + inventory aggregation with a cache-aside layer.
//!
//! Both views are cached under the gateway keys for
//! `GATEWAY_CACHE_TTL_SECONDS`. The services delete those keys on every
//! write, so the gateway never invalidates anything itself.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use common::{AppResult, Cache};
use domain::{cache_keys, Product, ProductWithInventory, GATEWAY_CACHE_TTL_SECONDS};

use crate::clients::{InventoryLookup, ProductCatalog};

/// Merges products with their stock.
pub struct ProductAggregator {
    products: Arc<dyn ProductCatalog>,
    inventory: Arc<dyn InventoryLookup>,
    cache: Cache,
    concurrency: usize,
}

impl ProductAggregator {
    pub fn new(
        products: Arc<dyn ProductCatalog>,
        inventory: Arc<dyn InventoryLookup>,
        cache: Cache,
        concurrency: usize,
    ) -> Self {
        Self {
            products,
            inventory,
            cache,
            concurrency: concurrency.max(1),
        }
    }

    /// One product with its inventory.
    ///
    /// Product lookup failures are returned as-is (502 when unreachable,
    /// the upstream status otherwise). A failed inventory lookup only leaves
    /// `inventory` out.
    pub async fn product_with_inventory(&self, id: i32) -> AppResult<ProductWithInventory> {
        let key = cache_keys::gateway_product_full(id);
        if let Some(view) = self.cache.get(&key).await {
            return Ok(view);
        }

        let product = self.products.get_product(id).await?;
        let view = self.attach_inventory(product).await;

        self.cache
            .set_with_ttl(&key, &view, GATEWAY_CACHE_TTL_SECONDS)
            .await;
        Ok(view)
    }

    /// Every product with its inventory, in catalog order.
    ///
    /// `force_refresh` skips the cache read; the fresh result is still cached.
    pub async fn all_products_with_inventory(
        &self,
        force_refresh: bool,
    ) -> AppResult<Vec<ProductWithInventory>> {
        let key = cache_keys::GATEWAY_PRODUCTS_FULL_ALL;
        if !force_refresh {
            if let Some(views) = self.cache.get(key).await {
                return Ok(views);
            }
        }

        let products = self.products.list_products().await?;
        debug!(count = products.len(), "Attaching inventory to product list");

        let views: Vec<ProductWithInventory> = stream::iter(products)
            .map(|product| self.attach_inventory(product))
            .buffered(self.concurrency)
            .collect()
            .await;

        self.cache
            .set_with_ttl(key, &views, GATEWAY_CACHE_TTL_SECONDS)
            .await;
        Ok(views)
    }

    async fn attach_inventory(&self, product: Product) -> ProductWithInventory {
        let inventory = match self.inventory.inventory_for_product(product.id).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(product_id = product.id, "Inventory unavailable: {}", e);
                None
            }
        };
        ProductWithInventory::merge(product, inventory)
    }
}
