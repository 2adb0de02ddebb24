//! Common utilities shared across all microservices.
//!
//! This crate provides:
//! - Unified HTTP error handling
//! - Configuration structures loaded from the environment
//! - The sea-orm connection pool and migration runner
//! - The cache-aside store (Redis or in-memory)
//! - Request extractors, middleware layers and tracing setup

pub mod cache;
pub mod config;
#[cfg(feature = "database")]
pub mod database;
pub mod error;
pub mod extractors;
pub mod health;
pub mod middleware;
pub mod telemetry;

pub use cache::{Cache, CacheError, CacheStore, MemoryStore};
pub use config::*;
pub use error::{AppError, AppResult, BoxError, OptionExt};
pub use extractors::{IdPath, ValidatedJson};
pub use health::{ComponentHealth, HealthChecks, HealthResponse};
