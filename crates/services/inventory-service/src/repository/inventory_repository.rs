//! Inventory repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

use super::entities::inventory::{self, ActiveModel, Entity as InventoryEntity};
use common::{AppError, AppResult};
use domain::{CreateInventory, Inventory, UpdateInventory};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Inventory repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// List every inventory row ordered by id
    async fn list(&self) -> AppResult<Vec<Inventory>>;

    /// Find inventory row by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Inventory>>;

    /// Find the inventory row of a product
    async fn find_by_product_id(&self, product_id: i32) -> AppResult<Option<Inventory>>;

    /// Insert a new row. A second row for the same product is a conflict.
    async fn create(&self, input: CreateInventory) -> AppResult<Inventory>;

    /// Apply a partial update and touch `last_updated`. `None` when the row is missing.
    async fn update(&self, id: i32, changes: UpdateInventory) -> AppResult<Option<Inventory>>;

    /// Delete a row, returning whether it existed
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Check database connectivity
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of InventoryRepository
pub struct InventoryStore {
    db: DatabaseConnection,
}

impl InventoryStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a unique-constraint violation on insert to a 409.
fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::conflict("Inventory for this product")
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl InventoryRepository for InventoryStore {
    async fn list(&self) -> AppResult<Vec<Inventory>> {
        let models = InventoryEntity::find()
            .order_by_asc(inventory::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Inventory::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Inventory>> {
        let result = InventoryEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Inventory::from))
    }

    async fn find_by_product_id(&self, product_id: i32) -> AppResult<Option<Inventory>> {
        let result = InventoryEntity::find()
            .filter(inventory::Column::ProductId.eq(product_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Inventory::from))
    }

    async fn create(&self, input: CreateInventory) -> AppResult<Inventory> {
        let active_model = ActiveModel {
            product_id: Set(input.product_id),
            quantity: Set(input.quantity),
            warehouse: Set(input.warehouse),
            last_updated: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(map_insert_error)?;
        Ok(Inventory::from(model))
    }

    async fn update(&self, id: i32, changes: UpdateInventory) -> AppResult<Option<Inventory>> {
        let Some(row) = InventoryEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = row.into();

        if let Some(quantity) = changes.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(warehouse) = changes.warehouse {
            active.warehouse = Set(warehouse);
        }
        active.last_updated = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(Inventory::from(model)))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = InventoryEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        common::database::ping(&self.db).await?;
        Ok(())
    }
}
