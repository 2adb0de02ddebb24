//! HTTP handlers.

pub mod aggregate_handler;
pub mod health_handler;
pub mod proxy_handler;

pub use aggregate_handler::{get_all_products_with_inventory, get_product_with_inventory};
pub use health_handler::health_routes;
pub use proxy_handler::{proxy_to_inventory, proxy_to_products};
