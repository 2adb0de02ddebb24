//! Aggregated product views served by the gateway itself.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use common::{AppResult, IdPath};
use domain::ProductWithInventory;

use crate::state::AppState;

/// Query parameters of the full product list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductsFullQuery {
    /// Skip the cached list and rebuild it
    #[serde(default)]
    pub force_refresh: Option<String>,
}

impl ProductsFullQuery {
    /// Only the literal `true` forces a refresh.
    pub fn force_refresh(&self) -> bool {
        self.force_refresh.as_deref() == Some("true")
    }
}

/// Get a product merged with its inventory
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with its inventory", body = ProductWithInventory),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Product not found"),
        (status = 502, description = "Product service unreachable")
    )
)]
pub async fn get_product_with_inventory(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ProductWithInventory>> {
    let view = state.aggregator.product_with_inventory(id).await?;
    Ok(Json(view))
}

/// List every product merged with its inventory
#[utoipa::path(
    get,
    path = "/api/products-full",
    tag = "Products",
    params(ProductsFullQuery),
    responses(
        (
            status = 200,
            description = "Products with their inventory",
            body = Vec<ProductWithInventory>
        ),
        (status = 502, description = "Product service unreachable")
    )
)]
pub async fn get_all_products_with_inventory(
    State(state): State<AppState>,
    Query(query): Query<ProductsFullQuery>,
) -> AppResult<Json<Vec<ProductWithInventory>>> {
    let views = state
        .aggregator
        .all_products_with_inventory(query.force_refresh())
        .await?;
    Ok(Json(views))
}
