//! SeaORM entities.

pub mod inventory;
