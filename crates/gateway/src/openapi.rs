//! OpenAPI documentation.

use utoipa::OpenApi;

use domain::{
    CreateInventory, CreateProduct, Inventory, InventorySummary, Product, ProductWithInventory,
    UpdateInventory, UpdateProduct,
};

/// API documentation struct.
///
/// Only the aggregated endpoints are described as paths; the proxied CRUD
/// endpoints share the schemas listed under `components`.
#[derive(OpenApi)]
#[openapi(
    info(title = "StockWiz API Gateway", description = "Product catalog and inventory"),
    paths(
        crate::handlers::aggregate_handler::get_product_with_inventory,
        crate::handlers::aggregate_handler::get_all_products_with_inventory,
    ),
    components(
        schemas(
            Product,
            CreateProduct,
            UpdateProduct,
            Inventory,
            CreateInventory,
            UpdateInventory,
            InventorySummary,
            ProductWithInventory,
        )
    ),
    tags(
        (name = "Products", description = "Products merged with their inventory"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_paths_are_documented() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/products/{id}"));
        assert!(doc.paths.paths.contains_key("/api/products-full"));
    }
}
