//! Domain-level constants.
//!
//! Service identities, health labels and cache lifetimes shared by every
//! service.

// =============================================================================
// Service Names
// =============================================================================

/// Name reported by the inventory service health check
pub const SERVICE_INVENTORY: &str = "inventory-service";

/// Name reported by the product service health check
pub const SERVICE_PRODUCT: &str = "product-service";

/// Name reported by the gateway health check
pub const SERVICE_GATEWAY: &str = "api-gateway";

// =============================================================================
// Health
// =============================================================================

pub const STATUS_HEALTHY: &str = "healthy";

pub const STATUS_UNHEALTHY: &str = "unhealthy";

pub const STATUS_DEGRADED: &str = "degraded";

// =============================================================================
// Cache TTLs
// =============================================================================

/// TTL for entries written by the inventory and product services (5 minutes)
pub const SERVICE_CACHE_TTL_SECONDS: u64 = 300;

/// TTL for aggregated views written by the gateway (3 minutes)
pub const GATEWAY_CACHE_TTL_SECONDS: u64 = 180;
