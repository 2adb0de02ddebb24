//! Domain layer - Core entities and data transfer objects.
//!
//! This crate contains pure domain types with no infrastructure dependencies.
//! All types here are shared across the services and the gateway as JSON.

pub mod cache_keys;
pub mod constants;
pub mod error;
pub mod inventory;
pub mod product;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use inventory::{CreateInventory, Inventory, InventorySummary, UpdateInventory};
pub use product::{CreateProduct, Product, ProductWithInventory, UpdateProduct};
