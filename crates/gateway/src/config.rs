//! Gateway configuration.

use common::{env_first, env_parse, CacheConfig, HttpConfig};

/// Default listening port
pub const DEFAULT_PORT: u16 = 8000;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Product service base URL
    pub product_service_url: String,
    /// Inventory service base URL
    pub inventory_service_url: String,
    /// Cache shared with the services
    pub cache: CacheConfig,
    pub http: HttpConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Timeout for a single upstream call
    pub upstream_timeout_seconds: u64,
    /// Inventory lookups in flight while building the full product list
    pub aggregate_concurrency: usize,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            product_service_url: env_first(&["PRODUCT_SERVICE_URL"])
                .unwrap_or(defaults.product_service_url),
            inventory_service_url: env_first(&["INVENTORY_SERVICE_URL"])
                .unwrap_or(defaults.inventory_service_url),
            cache: CacheConfig::from_env(&["GATEWAY_REDIS_URL", "REDIS_URL"]),
            http: HttpConfig::from_env(),
            host: env_first(&["GATEWAY_HOST"]).unwrap_or(defaults.host),
            port: env_parse("GATEWAY_PORT", defaults.port),
            upstream_timeout_seconds: env_parse(
                "UPSTREAM_TIMEOUT_SECONDS",
                defaults.upstream_timeout_seconds,
            ),
            aggregate_concurrency: env_parse(
                "AGGREGATE_CONCURRENCY",
                defaults.aggregate_concurrency,
            )
            .max(1),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            product_service_url: "http://localhost:8001".to_string(),
            inventory_service_url: "http://localhost:8002".to_string(),
            cache: CacheConfig::default(),
            http: HttpConfig::default(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            upstream_timeout_seconds: 30,
            aggregate_concurrency: 8,
        }
    }
}
