//! PostgreSQL implementation of the order repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{NewOrder, Order, OrderItem, OrderStatus};
use crate::domain::repositories::OrderRepository;
use crate::error::AppError;

/// PostgreSQL repository for orders and their line items.
pub struct PgOrderRepository {
    pool: Arc<PgPool>,
}

impl PgOrderRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Loads line items for a set of order ids, grouped by order.
    async fn load_items(&self, order_ids: &[i64]) -> Result<Vec<(i64, OrderItem)>, AppError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT order_id, product_id, quantity, unit_price_cents \
             FROM order_items \
             WHERE order_id = ANY($1) \
             ORDER BY order_id, product_id",
        )
        .bind(order_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    r.order_id,
                    OrderItem {
                        product_id: r.product_id,
                        quantity: r.quantity,
                        unit_price_cents: r.unit_price_cents,
                    },
                )
            })
            .collect())
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    status: String,
    total_cents: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    order_id: i64,
    product_id: i64,
    quantity: i32,
    unit_price_cents: i64,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, AppError> {
        let status = OrderStatus::parse(&self.status).ok_or_else(|| {
            AppError::internal(format!("unknown order status '{}' in storage", self.status))
        })?;

        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            status,
            total_cents: self.total_cents,
            created_at: self.created_at,
            items,
        })
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, new_order: NewOrder) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        // Conditional decrement guards against oversell: zero rows
        // affected means another order took the stock first (or the
        // product vanished), and the whole transaction rolls back.
        for item in &new_order.items {
            let updated = sqlx::query(
                "UPDATE products \
                 SET stock_quantity = stock_quantity - $1, updated_at = now() \
                 WHERE id = $2 AND stock_quantity >= $1",
            )
            .bind(item.quantity)
            .bind(item.product_id)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                return Err(AppError::conflict(
                    "Insufficient stock for product",
                    json!({ "product_id": item.product_id, "requested": item.quantity }),
                ));
            }
        }

        let row: OrderRow = sqlx::query_as(
            "INSERT INTO orders (user_id, status, total_cents) \
             VALUES ($1, $2, $3) \
             RETURNING id, user_id, status, total_cents, created_at",
        )
        .bind(new_order.user_id)
        .bind(OrderStatus::Pending.as_str())
        .bind(new_order.total_cents)
        .fetch_one(&mut *tx)
        .await?;

        for item in &new_order.items {
            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(row.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        row.into_order(new_order.items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        let row: Option<OrderRow> = sqlx::query_as(
            "SELECT id, user_id, status, total_cents, created_at FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self
            .load_items(&[row.id])
            .await?
            .into_iter()
            .map(|(_, item)| item)
            .collect();

        Ok(Some(row.into_order(items)?))
    }

    async fn list(
        &self,
        user_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, AppError> {
        let rows: Vec<OrderRow> = match user_id {
            Some(uid) => {
                sqlx::query_as(
                    "SELECT id, user_id, status, total_cents, created_at \
                     FROM orders WHERE user_id = $1 \
                     ORDER BY id DESC LIMIT $2 OFFSET $3",
                )
                .bind(uid)
                .bind(limit)
                .bind(offset)
                .fetch_all(self.pool.as_ref())
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT id, user_id, status, total_cents, created_at \
                     FROM orders \
                     ORDER BY id DESC LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(self.pool.as_ref())
                .await?
            }
        };

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for (order_id, item) in self.load_items(&ids).await? {
            by_order.entry(order_id).or_default().push(item);
        }

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let items = by_order.remove(&row.id).unwrap_or_default();
            orders.push(row.into_order(items)?);
        }

        Ok(orders)
    }

    async fn count(&self, user_id: Option<i64>) -> Result<i64, AppError> {
        let count: i64 = match user_id {
            Some(uid) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
                    .bind(uid)
                    .fetch_one(self.pool.as_ref())
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM orders")
                    .fetch_one(self.pool.as_ref())
                    .await?
            }
        };

        Ok(count)
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, AppError> {
        let row: Option<OrderRow> = sqlx::query_as(
            "UPDATE orders SET status = $2 WHERE id = $1 \
             RETURNING id, user_id, status, total_cents, created_at",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Err(AppError::not_found("Order not found", json!({ "id": id })));
        };

        let items = self
            .load_items(&[row.id])
            .await?
            .into_iter()
            .map(|(_, item)| item)
            .collect();

        row.into_order(items)
    }
}
