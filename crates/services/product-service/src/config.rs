//! Product service configuration.

use common::{env_first, env_parse, CacheConfig, DatabaseConfig, HttpConfig};

/// Default listening port
pub const DEFAULT_PORT: u16 = 8001;

/// Product service configuration.
#[derive(Debug, Clone)]
pub struct ProductServiceConfig {
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub http: HttpConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl ProductServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(&["PRODUCT_SERVICE_DATABASE_URL", "DATABASE_URL"]),
            cache: CacheConfig::from_env(&["PRODUCT_SERVICE_REDIS_URL", "REDIS_URL"]),
            http: HttpConfig::from_env(),
            host: env_first(&["PRODUCT_SERVICE_HOST"]).unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env_parse("PRODUCT_SERVICE_PORT", DEFAULT_PORT),
        }
    }
}
