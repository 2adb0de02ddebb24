//! Inventory CRUD handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::{AppResult, IdPath, ValidatedJson};
use domain::{CreateInventory, Inventory, UpdateInventory};

use crate::state::AppState;

/// Create inventory routes
pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory).post(create_inventory))
        .route(
            "/:id",
            get(get_inventory)
                .put(update_inventory)
                .delete(delete_inventory),
        )
        .route("/product/:product_id", get(get_inventory_by_product))
}

/// List every inventory row
pub async fn list_inventory(State(state): State<AppState>) -> AppResult<Json<Vec<Inventory>>> {
    let rows = state.inventory_service.list_inventory().await?;
    Ok(Json(rows))
}

/// Get inventory row by ID
pub async fn get_inventory(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Inventory>> {
    let row = state.inventory_service.get_inventory(id).await?;
    Ok(Json(row))
}

/// Get the inventory row of a product
pub async fn get_inventory_by_product(
    State(state): State<AppState>,
    IdPath(product_id): IdPath,
) -> AppResult<Json<Inventory>> {
    let row = state
        .inventory_service
        .get_inventory_by_product(product_id)
        .await?;
    Ok(Json(row))
}

/// Create the inventory row of a product
pub async fn create_inventory(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateInventory>,
) -> AppResult<(StatusCode, Json<Inventory>)> {
    let row = state.inventory_service.create_inventory(payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Partially update an inventory row
pub async fn update_inventory(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateInventory>,
) -> AppResult<Json<Inventory>> {
    let row = state.inventory_service.update_inventory(id, payload).await?;
    Ok(Json(row))
}

/// Delete an inventory row
pub async fn delete_inventory(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    state.inventory_service.delete_inventory(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
