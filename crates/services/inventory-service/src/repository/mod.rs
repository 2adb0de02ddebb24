//! Repository layer for data access.

pub mod entities;
mod inventory_repository;

pub use inventory_repository::{InventoryRepository, InventoryStore};

#[cfg(any(test, feature = "test-utils"))]
pub use inventory_repository::MockInventoryRepository;
