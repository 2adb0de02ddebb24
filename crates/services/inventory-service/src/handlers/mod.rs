//! HTTP handlers.

pub mod health_handler;
pub mod inventory_handler;

pub use health_handler::health_routes;
pub use inventory_handler::inventory_routes;
