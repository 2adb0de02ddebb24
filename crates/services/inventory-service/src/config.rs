//! Inventory service configuration.

use common::{env_first, env_parse, CacheConfig, DatabaseConfig, HttpConfig};

/// Default listening port
pub const DEFAULT_PORT: u16 = 8002;

/// Inventory service configuration.
#[derive(Debug, Clone)]
pub struct InventoryServiceConfig {
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub http: HttpConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl InventoryServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(&["INVENTORY_SERVICE_DATABASE_URL", "DATABASE_URL"]),
            cache: CacheConfig::from_env(&["INVENTORY_SERVICE_REDIS_URL", "REDIS_URL"]),
            http: HttpConfig::from_env(),
            host: env_first(&["INVENTORY_SERVICE_HOST"]).unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env_parse("INVENTORY_SERVICE_PORT", DEFAULT_PORT),
        }
    }
}

impl Default for InventoryServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            http: HttpConfig::default(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}
