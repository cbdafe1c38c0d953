//! PostgreSQL implementation of the product repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewProduct, Product, ProductPatch};
use crate::domain::repositories::ProductRepository;
use crate::error::AppError;
use crate::utils::db_error::{is_foreign_key_violation, is_unique_violation};

const PRODUCT_COLUMNS: &str =
    "id, sku, name, description, price_cents, stock_quantity, created_at, updated_at";

/// PostgreSQL repository for the product catalog.
pub struct PgProductRepository {
    pool: Arc<PgPool>,
}

impl PgProductRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    sku: String,
    name: String,
    description: Option<String>,
    price_cents: i64,
    stock_quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            sku: row.sku,
            name: row.name,
            description: row.description,
            price_cents: row.price_cents,
            stock_quantity: row.stock_quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, new_product: NewProduct) -> Result<Product, AppError> {
        let sql = format!(
            "INSERT INTO products (sku, name, description, price_cents, stock_quantity) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row: ProductRow = sqlx::query_as(&sql)
            .bind(&new_product.sku)
            .bind(&new_product.name)
            .bind(&new_product.description)
            .bind(new_product.price_cents)
            .bind(new_product.stock_quantity)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e, "products_sku_key") {
                    AppError::conflict(
                        "A product with this SKU already exists",
                        json!({ "sku": new_product.sku }),
                    )
                } else {
                    e.into()
                }
            })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");

        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>, AppError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id LIMIT $1 OFFSET $2");

        let rows: Vec<ProductRow> = sqlx::query_as(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Product, AppError> {
        // Read-modify-write under a row lock so concurrent patches
        // cannot interleave.
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE");
        let current: Option<ProductRow> = sqlx::query_as(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(current) = current else {
            return Err(AppError::not_found("Product not found", json!({ "id": id })));
        };

        let name = patch.name.unwrap_or(current.name);
        let description = match patch.description {
            Some(value) => value,
            None => current.description,
        };
        let price_cents = patch.price_cents.unwrap_or(current.price_cents);
        let stock_quantity = patch.stock_quantity.unwrap_or(current.stock_quantity);

        let update = format!(
            "UPDATE products \
             SET name = $2, description = $3, price_cents = $4, stock_quantity = $5, updated_at = now() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row: ProductRow = sqlx::query_as(&update)
            .bind(id)
            .bind(&name)
            .bind(&description)
            .bind(price_cents)
            .bind(stock_quantity)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::conflict(
                        "Product is referenced by existing orders",
                        json!({ "id": id }),
                    )
                } else {
                    e.into()
                }
            })?;

        Ok(result.rows_affected() > 0)
    }
}
