//! Product domain entity and related types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DomainError, DomainResult};
use crate::inventory::InventorySummary;

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
}

/// Product creation data transfer object
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[cfg_attr(feature = "openapi", schema(example = "Laptop"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    #[cfg_attr(feature = "openapi", schema(example = 999.99))]
    pub price: f64,
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    #[serde(default)]
    pub category: Option<String>,
}

/// Partial product update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl UpdateProduct {
    /// Check whether the update carries no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }

    /// Reject updates that would change nothing
    pub fn ensure_not_empty(&self) -> DomainResult<()> {
        if self.is_empty() {
            return Err(DomainError::EmptyUpdate);
        }
        Ok(())
    }
}

/// Product merged with its inventory, as served by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProductWithInventory {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    /// Absent when the product has no inventory row or the lookup failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<InventorySummary>,
}

impl ProductWithInventory {
    /// Merge a product with its (optional) inventory summary
    pub fn merge(product: Product, inventory: Option<InventorySummary>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            inventory,
        }
    }
}

impl From<Product> for ProductWithInventory {
    fn from(product: Product) -> Self {
        Self::merge(product, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Product {
        Product {
            id: 1,
            name: "Laptop".to_string(),
            description: None,
            price: 999.99,
            category: Some("electronics".to_string()),
        }
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let update = UpdateProduct::default();
        assert!(update.is_empty());
        assert_eq!(
            update.ensure_not_empty(),
            Err(DomainError::EmptyUpdate)
        );

        let update = UpdateProduct {
            price: Some(10.0),
            ..Default::default()
        };
        assert!(update.ensure_not_empty().is_ok());
    }

    #[test]
    fn test_create_product_validation() {
        let valid = CreateProduct {
            name: "Desk".to_string(),
            description: None,
            price: 120.0,
            category: None,
        };
        assert!(valid.validate().is_ok());

        let free = CreateProduct {
            price: 0.0,
            ..valid.clone()
        };
        assert!(free.validate().is_err());

        let unnamed = CreateProduct {
            name: String::new(),
            ..valid
        };
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_inventory_omitted_when_absent() {
        let json = serde_json::to_value(ProductWithInventory::from(laptop())).unwrap();

        assert!(json.get("inventory").is_none());
        assert!(json["description"].is_null());
        assert_eq!(json["category"], "electronics");
    }

    #[test]
    fn test_merge_embeds_inventory() {
        let merged = ProductWithInventory::merge(
            laptop(),
            Some(InventorySummary {
                quantity: 4,
                warehouse: "East".to_string(),
            }),
        );
        let json = serde_json::to_value(&merged).unwrap();

        assert_eq!(json["inventory"]["quantity"], 4);
        assert_eq!(json["inventory"]["warehouse"], "East");
    }
}
