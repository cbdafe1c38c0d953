//! Product entity: a purchasable catalog item.

use chrono::{DateTime, Utc};

/// A catalog product.
///
/// Prices are stored as integer cents to avoid floating point rounding.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns true if at least `quantity` units are available.
    pub fn has_stock(&self, quantity: i32) -> bool {
        self.stock_quantity >= quantity
    }
}

/// Input data for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock_quantity: i32,
}

/// Partial update for an existing product.
///
/// `None` fields are left unchanged. `description: Some(None)` clears the
/// description; `Some(Some(text))` replaces it.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price_cents: Option<i64>,
    pub stock_quantity: Option<i32>,
}

impl ProductPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.stock_quantity.is_none()
    }
}
