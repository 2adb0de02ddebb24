//! Infrastructure layer - database pool and migrations.

pub mod migrations;

pub use migrations::Migrator;

/// Connection pool bound to this service's migrations.
pub type Database = common::database::Database<Migrator>;
