//! Cache-aside store shared by the services and the gateway.
//!
//! Values are JSON strings addressed by string keys with a TTL. The cache is
//! an optimisation only: a failed read is a miss and a failed write or
//! invalidation is logged, never surfaced to the caller.

mod memory_store;
#[cfg(feature = "cache")]
mod redis_store;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{CacheBackend, CacheConfig};

pub use memory_store::MemoryStore;
#[cfg(feature = "cache")]
pub use redis_store::RedisStore;

/// How often the in-memory backend purges expired entries
const MEMORY_SWEEP_INTERVAL_SECONDS: u64 = 60;

/// Errors raised by a cache store.
#[derive(Error, Debug)]
pub enum CacheError {
    #[cfg(feature = "cache")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache backend not available: {0}")]
    Unavailable(String),
}

/// Raw key/value store with TTL support.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get the raw value stored under `key`.
    async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, expiring after `ttl_seconds`.
    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError>;

    /// Delete every key in `keys`. Missing keys are ignored.
    async fn delete_many(&self, keys: &[String]) -> Result<(), CacheError>;

    /// Check connectivity.
    async fn ping(&self) -> Result<(), CacheError>;
}

/// Typed cache handle over a shared store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
}

impl Cache {
    /// Wrap an existing store.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Cache backed by a fresh process-local store.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Connect to Redis.
    #[cfg(feature = "cache")]
    pub async fn redis(url: &str) -> Result<Self, CacheError> {
        Ok(Self::new(Arc::new(RedisStore::connect(url).await?)))
    }

    /// Build the cache selected by configuration.
    pub async fn connect(config: &CacheConfig) -> Result<Self, CacheError> {
        match config.backend {
            CacheBackend::Memory => {
                tracing::info!("Using in-memory cache");
                let store = MemoryStore::new();
                store.spawn_sweeper(Duration::from_secs(MEMORY_SWEEP_INTERVAL_SECONDS));
                Ok(Self::new(Arc::new(store)))
            }
            #[cfg(feature = "cache")]
            CacheBackend::Redis => Self::redis(&config.url).await,
            #[cfg(not(feature = "cache"))]
            CacheBackend::Redis => Err(CacheError::Unavailable(
                "built without the `cache` feature".to_string(),
            )),
        }
    }

    // =========================================================================
    // Typed Operations
    // =========================================================================

    /// Get a value from cache. Errors and undecodable entries count as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get_raw(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Cache get error for key {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key = %key, "Cache hit");
                Some(value)
            }
            Err(e) => {
                warn!("Failed to deserialize cached value for key {}: {}", key, e);
                None
            }
        }
    }

    /// Set a value in cache with a TTL in seconds.
    pub async fn set_with_ttl<T: Serialize>(&self, key: &str, value: &T, ttl_seconds: u64) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize value for key {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.set_raw(key, json, ttl_seconds).await {
            warn!("Cache set error for key {}: {}", key, e);
        }
    }

    /// Delete every key in `keys`.
    pub async fn invalidate(&self, keys: &[String]) {
        if keys.is_empty() {
            return;
        }

        match self.store.delete_many(keys).await {
            Ok(()) => debug!(?keys, "Cache invalidated"),
            Err(e) => warn!(?keys, "Cache invalidation error: {}", e),
        }
    }

    /// Check store connectivity.
    pub async fn ping(&self) -> Result<(), CacheError> {
        self.store.ping().await
    }
}
