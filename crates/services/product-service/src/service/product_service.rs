//! Product service - cache-aside reads and invalidating writes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use common::{AppError, AppResult, Cache, ComponentHealth, HealthChecks, OptionExt};
use domain::{cache_keys, CreateProduct, Product, UpdateProduct, SERVICE_CACHE_TTL_SECONDS};

use crate::repository::ProductRepository;

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// List products, optionally filtered by category
    async fn list_products(&self, category: Option<String>) -> AppResult<Vec<Product>>;

    /// Get product by ID
    async fn get_product(&self, id: i32) -> AppResult<Product>;

    /// Create a new product
    async fn create_product(&self, input: CreateProduct) -> AppResult<Product>;

    /// Partially update a product
    async fn update_product(&self, id: i32, changes: UpdateProduct) -> AppResult<Product>;

    /// Delete a product
    async fn delete_product(&self, id: i32) -> AppResult<()>;

    /// Probe the database and the cache
    async fn health(&self) -> HealthChecks;
}

/// Concrete implementation of ProductService over a repository and the shared cache.
pub struct ProductManager {
    repo: Arc<dyn ProductRepository>,
    cache: Cache,
}

impl ProductManager {
    /// Create new product service instance
    pub fn new(repo: Arc<dyn ProductRepository>, cache: Cache) -> Self {
        Self { repo, cache }
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn list_products(&self, category: Option<String>) -> AppResult<Vec<Product>> {
        let key = cache_keys::product_list(category.as_deref());
        if let Some(products) = self.cache.get(&key).await {
            return Ok(products);
        }

        let products = self.repo.list(category).await?;
        self.cache
            .set_with_ttl(&key, &products, SERVICE_CACHE_TTL_SECONDS)
            .await;
        Ok(products)
    }

    async fn get_product(&self, id: i32) -> AppResult<Product> {
        let key = cache_keys::product(id);
        if let Some(product) = self.cache.get(&key).await {
            return Ok(product);
        }

        let product = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_not_found("Product not found")?;
        self.cache
            .set_with_ttl(&key, &product, SERVICE_CACHE_TTL_SECONDS)
            .await;
        Ok(product)
    }

    async fn create_product(&self, input: CreateProduct) -> AppResult<Product> {
        let product = self.repo.create(input).await?;

        // A new product only changes the lists it appears in
        let mut keys = vec![
            cache_keys::PRODUCTS_ALL.to_string(),
            cache_keys::GATEWAY_PRODUCTS_FULL_ALL.to_string(),
        ];
        if let Some(category) = product.category.as_deref() {
            keys.push(cache_keys::products_by_category(category));
        }
        self.cache.invalidate(&keys).await;

        info!(id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    async fn update_product(&self, id: i32, changes: UpdateProduct) -> AppResult<Product> {
        changes.ensure_not_empty()?;

        let previous = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_not_found("Product not found")?;

        let product = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_not_found("Product not found")?;

        let categories = previous
            .category
            .as_deref()
            .into_iter()
            .chain(product.category.as_deref());
        self.cache
            .invalidate(&cache_keys::product_write_keys(id, categories))
            .await;

        info!(id, "Product updated");
        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> AppResult<()> {
        // Fetch first: the category is needed to build the key set
        let previous = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_not_found("Product not found")?;

        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Product not found"));
        }

        self.cache
            .invalidate(&cache_keys::product_write_keys(
                id,
                previous.category.as_deref(),
            ))
            .await;

        info!(id, "Product deleted");
        Ok(())
    }

    async fn health(&self) -> HealthChecks {
        HealthChecks {
            database: ComponentHealth::from_result(self.repo.ping().await),
            cache: ComponentHealth::from_result(self.cache.ping().await),
        }
    }
}
