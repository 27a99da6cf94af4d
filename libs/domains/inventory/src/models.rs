use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Product entity - a single stocked item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the storage layer
    pub id: i64,
    /// Display name
    pub name: String,
    /// Free-form grouping label (no referential integrity)
    pub category: String,
    /// Current stock count
    pub quantity: i32,
    /// Threshold at or below which the product counts as low stock
    pub min_stock: i32,
    /// Unit price
    pub price: f64,
    /// Free-form brand/vendor label
    pub supplier: String,
    /// Refreshed by the storage layer on every write
    pub last_updated: DateTime<Utc>,
}

/// DTO for creating a new product
///
/// A caller-supplied `id` is ignored: the storage layer always assigns one.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 0))]
    pub min_stock: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1))]
    pub supplier: String,
}

/// DTO for updating an existing product
///
/// Updates replace every mutable field; `id` and `last_updated` stay
/// server-controlled.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 0))]
    pub min_stock: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1))]
    pub supplier: String,
}

/// Aggregate statistics over the whole inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    /// Total number of products
    pub total_products: u64,
    /// Products with quantity <= minStock
    pub low_stock_count: u64,
    /// Products with quantity == 0
    pub out_of_stock_count: u64,
    /// Sum of quantity * price over all products
    pub total_value: f64,
}

/// Query parameters for substring search
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against name, category and supplier
    pub query: String,
}

impl Product {
    /// Whether the product is at or below its low-stock threshold
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }

    /// Whether the product is out of stock
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    /// Overwrite every mutable field from an UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.category = update.category;
        self.quantity = update.quantity;
        self.min_stock = update.min_stock;
        self.price = update.price;
        self.supplier = update.supplier;
        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn widget() -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            quantity: 5,
            min_stock: 10,
            price: 2.5,
            supplier: "Acme".to_string(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_at_threshold() {
        let mut product = widget();
        product.quantity = 10;
        assert!(product.is_low_stock());

        product.quantity = 11;
        assert!(!product.is_low_stock());
    }

    #[test]
    fn test_out_of_stock_is_also_low_stock() {
        let mut product = widget();
        product.quantity = 0;
        assert!(product.is_out_of_stock());
        assert!(product.is_low_stock());
    }

    #[test]
    fn test_apply_update_replaces_all_fields() {
        let mut product = widget();
        let before = product.last_updated;

        product.apply_update(UpdateProduct {
            name: "Widget Mk2".to_string(),
            category: "Hardware".to_string(),
            quantity: 50,
            min_stock: 5,
            price: 3.75,
            supplier: "Globex".to_string(),
        });

        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Widget Mk2");
        assert_eq!(product.category, "Hardware");
        assert_eq!(product.quantity, 50);
        assert_eq!(product.supplier, "Globex");
        assert!(product.last_updated >= before);
    }

    #[test]
    fn test_create_product_rejects_empty_name() {
        let input = CreateProduct {
            name: String::new(),
            category: "Tools".to_string(),
            quantity: 1,
            min_stock: 0,
            price: 1.0,
            supplier: "Acme".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_product_rejects_negative_quantity() {
        let input = CreateProduct {
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            quantity: -1,
            min_stock: 0,
            price: 1.0,
            supplier: "Acme".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_product_json_shape_is_camel_case() {
        let json = serde_json::to_value(widget()).unwrap();
        assert!(json.get("minStock").is_some());
        assert!(json.get("lastUpdated").is_some());
        assert!(json.get("min_stock").is_none());
    }
}
