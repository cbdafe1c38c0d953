//! DTOs for the product catalog endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::pagination::PageInfo;
use crate::domain::entities::{NewProduct, Product, ProductPatch};

/// Request to add a product to the catalog.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 64))]
    pub sku: String,

    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub description: Option<String>,

    /// Price in integer cents.
    #[validate(range(min = 0))]
    pub price_cents: i64,

    #[validate(range(min = 0))]
    pub stock_quantity: i32,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            sku: self.sku,
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
            stock_quantity: self.stock_quantity,
        }
    }
}

/// Partial product update. Absent fields are unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,

    #[validate(range(min = 0))]
    pub stock_quantity: Option<i32>,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            description: self.description.map(Some),
            price_cents: self.price_cents,
            stock_quantity: self.stock_quantity,
        }
    }
}

/// JSON representation of a catalog product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            sku: product.sku,
            name: product.name,
            description: product.description,
            price_cents: product.price_cents,
            stock_quantity: product.stock_quantity,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Paginated product listing.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub items: Vec<ProductResponse>,
    pub pagination: PageInfo,
}
