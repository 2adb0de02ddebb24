//! Cache key builders.
//!
//! Every service reads and invalidates through these functions so that the
//! writer of a key and the code that deletes it can never drift apart.

/// Cached list of every inventory row.
pub const INVENTORY_ALL: &str = "inventory:all";

/// Cached list of every product without a category filter.
pub const PRODUCTS_ALL: &str = "products:all";

/// Gateway's cached list of products merged with their inventory.
pub const GATEWAY_PRODUCTS_FULL_ALL: &str = "gateway:products_full:all";

pub fn inventory(id: i32) -> String {
    format!("inventory:{}", id)
}

pub fn inventory_by_product(product_id: i32) -> String {
    format!("inventory:product:{}", product_id)
}

pub fn product(id: i32) -> String {
    format!("product:{}", id)
}

pub fn products_by_category(category: &str) -> String {
    format!("products:all:{}", category)
}

/// Key for a product list, optionally filtered by category.
pub fn product_list(category: Option<&str>) -> String {
    match category {
        Some(category) => products_by_category(category),
        None => PRODUCTS_ALL.to_string(),
    }
}

pub fn gateway_product_full(product_id: i32) -> String {
    format!("gateway:product_full:{}", product_id)
}

/// Keys made stale by any write to an inventory row.
///
/// Covers the inventory service's own entries, the gateway views that embed
/// the row, and the product service entries for the same product.
pub fn inventory_write_keys(inventory_id: i32, product_id: i32) -> Vec<String> {
    vec![
        inventory(inventory_id),
        INVENTORY_ALL.to_string(),
        inventory_by_product(product_id),
        gateway_product_full(product_id),
        GATEWAY_PRODUCTS_FULL_ALL.to_string(),
        product(product_id),
        PRODUCTS_ALL.to_string(),
    ]
}

/// Keys made stale by any write to a product.
///
/// `categories` lists every category the product belonged to before and after
/// the write; duplicates are removed.
pub fn product_write_keys<'a, I>(product_id: i32, categories: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut keys = vec![
        product(product_id),
        PRODUCTS_ALL.to_string(),
        gateway_product_full(product_id),
        GATEWAY_PRODUCTS_FULL_ALL.to_string(),
    ];

    for category in categories {
        let key = products_by_category(category);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    keys
}
