//! Inventory domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stock held for a single product in a warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Inventory {
    pub id: i32,
    /// Product this stock belongs to (one row per product)
    pub product_id: i32,
    pub quantity: i32,
    pub warehouse: String,
    pub last_updated: DateTime<Utc>,
}

impl Inventory {
    /// Quantity and warehouse only, as embedded in product views.
    pub fn summary(&self) -> InventorySummary {
        InventorySummary {
            quantity: self.quantity,
            warehouse: self.warehouse.clone(),
        }
    }
}

/// Inventory creation data transfer object
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateInventory {
    #[cfg_attr(feature = "openapi", schema(example = 100))]
    pub product_id: i32,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    #[cfg_attr(feature = "openapi", schema(example = 50))]
    pub quantity: i32,
    #[validate(length(min = 1, max = 255, message = "Warehouse must be 1-255 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Warehouse A"))]
    pub warehouse: String,
}

/// Partial inventory update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateInventory {
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[validate(length(min = 1, max = 255, message = "Warehouse must be 1-255 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
}

/// Inventory fields embedded in an aggregated product view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InventorySummary {
    pub quantity: i32,
    pub warehouse: String,
}
