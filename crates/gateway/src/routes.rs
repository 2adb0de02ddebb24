//! Route configuration.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::middleware::{cors_layer, timeout_layer};

use crate::handlers::{
    get_all_products_with_inventory, get_product_with_inventory, health_routes,
    proxy_to_inventory, proxy_to_products,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes and layers.
pub fn create_router(state: AppState, request_timeout_seconds: u64) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_routes())
        .with_state(state)
        .layer(timeout_layer(request_timeout_seconds))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// `/api` routes: aggregated reads plus the relayed CRUD endpoints.
fn api_routes() -> Router<AppState> {
    Router::new()
        // Products
        .route("/api/products", get(proxy_to_products).post(proxy_to_products))
        .route(
            "/api/products/:id",
            get(get_product_with_inventory)
                .put(proxy_to_products)
                .delete(proxy_to_products),
        )
        .route("/api/products-full", get(get_all_products_with_inventory))
        // Inventory
        .route("/api/inventory", get(proxy_to_inventory).post(proxy_to_inventory))
        .route(
            "/api/inventory/:id",
            get(proxy_to_inventory)
                .put(proxy_to_inventory)
                .delete(proxy_to_inventory),
        )
        .route("/api/inventory/product/:product_id", get(proxy_to_inventory))
}
