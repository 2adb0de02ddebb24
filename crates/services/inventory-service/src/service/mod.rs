//! Service layer - business logic.

mod inventory_service;

pub use inventory_service::{InventoryManager, InventoryService};
