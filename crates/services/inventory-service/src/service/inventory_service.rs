//! Inventory service - cache-aside reads and invalidating writes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use common::{AppError, AppResult, Cache, ComponentHealth, HealthChecks, OptionExt};
use domain::{
    cache_keys, CreateInventory, Inventory, UpdateInventory, SERVICE_CACHE_TTL_SECONDS,
};

use crate::repository::InventoryRepository;

/// Inventory service trait for dependency injection.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// List every inventory row
    async fn list_inventory(&self) -> AppResult<Vec<Inventory>>;

    /// Get inventory row by ID
    async fn get_inventory(&self, id: i32) -> AppResult<Inventory>;

    /// Get the inventory row of a product
    async fn get_inventory_by_product(&self, product_id: i32) -> AppResult<Inventory>;

    /// Create the inventory row of a product
    async fn create_inventory(&self, input: CreateInventory) -> AppResult<Inventory>;

    /// Partially update an inventory row
    async fn update_inventory(&self, id: i32, changes: UpdateInventory) -> AppResult<Inventory>;

    /// Delete an inventory row
    async fn delete_inventory(&self, id: i32) -> AppResult<()>;

    /// Probe the database and the cache
    async fn health(&self) -> HealthChecks;
}

/// Concrete implementation of InventoryService over a repository and the shared cache.
pub struct InventoryManager {
    repo: Arc<dyn InventoryRepository>,
    cache: Cache,
}

impl InventoryManager {
    /// Create new inventory service instance
    pub fn new(repo: Arc<dyn InventoryRepository>, cache: Cache) -> Self {
        Self { repo, cache }
    }

    async fn invalidate_row(&self, inventory: &Inventory) {
        let keys = cache_keys::inventory_write_keys(inventory.id, inventory.product_id);
        self.cache.invalidate(&keys).await;
    }
}

#[async_trait]
impl InventoryService for InventoryManager {
    async fn list_inventory(&self) -> AppResult<Vec<Inventory>> {
        if let Some(rows) = self.cache.get(cache_keys::INVENTORY_ALL).await {
            return Ok(rows);
        }

        let rows = self.repo.list().await?;
        self.cache
            .set_with_ttl(cache_keys::INVENTORY_ALL, &rows, SERVICE_CACHE_TTL_SECONDS)
            .await;
        Ok(rows)
    }

    async fn get_inventory(&self, id: i32) -> AppResult<Inventory> {
        let key = cache_keys::inventory(id);
        if let Some(row) = self.cache.get(&key).await {
            return Ok(row);
        }

        let row = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_not_found("Inventory not found")?;
        self.cache
            .set_with_ttl(&key, &row, SERVICE_CACHE_TTL_SECONDS)
            .await;
        Ok(row)
    }

    async fn get_inventory_by_product(&self, product_id: i32) -> AppResult<Inventory> {
        let key = cache_keys::inventory_by_product(product_id);
        if let Some(row) = self.cache.get(&key).await {
            return Ok(row);
        }

        let row = self
            .repo
            .find_by_product_id(product_id)
            .await?
            .ok_or_not_found("Inventory not found for this product")?;
        self.cache
            .set_with_ttl(&key, &row, SERVICE_CACHE_TTL_SECONDS)
            .await;
        Ok(row)
    }

    async fn create_inventory(&self, input: CreateInventory) -> AppResult<Inventory> {
        // Check if the product already has stock recorded
        if self
            .repo
            .find_by_product_id(input.product_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Inventory for this product"));
        }

        let row = self.repo.create(input).await?;
        self.invalidate_row(&row).await;
        info!(id = row.id, product_id = row.product_id, "Inventory created");
        Ok(row)
    }

    async fn update_inventory(&self, id: i32, changes: UpdateInventory) -> AppResult<Inventory> {
        let row = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_not_found("Inventory not found")?;

        self.invalidate_row(&row).await;
        debug!(id, quantity = row.quantity, "Inventory updated");
        Ok(row)
    }

    async fn delete_inventory(&self, id: i32) -> AppResult<()> {
        // Fetch first: the product id is needed to build the key set
        let row = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_not_found("Inventory not found")?;

        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Inventory not found"));
        }

        self.invalidate_row(&row).await;
        info!(id, product_id = row.product_id, "Inventory deleted");
        Ok(())
    }

    async fn health(&self) -> HealthChecks {
        HealthChecks {
            database: ComponentHealth::from_result(self.repo.ping().await),
            cache: ComponentHealth::from_result(self.cache.ping().await),
        }
    }
}
