//! Order placement and lifecycle service.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewOrder, Order, OrderItem, OrderStatus};
use crate::domain::repositories::{OrderRepository, ProductRepository, UserRepository};
use crate::error::AppError;

/// A requested order line before pricing: what the client asked for.
#[derive(Debug, Clone)]
pub struct RequestedLine {
    pub product_id: i64,
    pub quantity: i32,
}

/// Service for placing orders and driving their status lifecycle.
///
/// Prices are captured from the catalog at placement time and the order
/// total is computed server-side; the client never supplies amounts.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    users: Arc<dyn UserRepository>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            orders,
            products,
            users,
        }
    }

    /// Places an order for `user_id`.
    ///
    /// Resolves every requested line against the catalog, captures unit
    /// prices, computes the total, and persists the order. Stock is
    /// decremented atomically by the repository; the pre-check here only
    /// produces a friendlier error for the common case.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for an unknown user or product
    /// - [`AppError::Validation`] for duplicate product lines
    /// - [`AppError::Conflict`] when stock is insufficient
    pub async fn place_order(
        &self,
        user_id: i64,
        lines: Vec<RequestedLine>,
    ) -> Result<Order, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))?;

        let mut seen = HashSet::new();
        for line in &lines {
            if !seen.insert(line.product_id) {
                return Err(AppError::bad_request(
                    "Duplicate product in order items",
                    json!({ "product_id": line.product_id }),
                ));
            }
        }

        let mut items = Vec::with_capacity(lines.len());
        let mut total_cents: i64 = 0;

        for line in &lines {
            let product = self
                .products
                .find_by_id(line.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found("Product not found", json!({ "id": line.product_id }))
                })?;

            if !product.has_stock(line.quantity) {
                return Err(AppError::conflict(
                    "Insufficient stock for product",
                    json!({
                        "product_id": product.id,
                        "requested": line.quantity,
                        "available": product.stock_quantity,
                    }),
                ));
            }

            let item = OrderItem {
                product_id: product.id,
                quantity: line.quantity,
                unit_price_cents: product.price_cents,
            };
            total_cents += item.line_total_cents();
            items.push(item);
        }

        self.orders
            .create(NewOrder {
                user_id,
                total_cents,
                items,
            })
            .await
    }

    /// Fetches an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id does not exist.
    pub async fn get_order(&self, id: i64) -> Result<Order, AppError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found", json!({ "id": id })))
    }

    /// Lists a page of orders (optionally one user's) with the total count.
    pub async fn list_orders(
        &self,
        user_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Order>, i64), AppError> {
        let orders = self.orders.list(user_id, offset, limit).await?;
        let total = self.orders.count(user_id).await?;
        Ok((orders, total))
    }

    /// Moves an order to `next` status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown order,
    /// [`AppError::Conflict`] for a disallowed transition.
    pub async fn update_status(&self, id: i64, next: OrderStatus) -> Result<Order, AppError> {
        let order = self.get_order(id).await?;

        if !order.status.can_transition_to(next) {
            return Err(AppError::conflict(
                "Order status transition not allowed",
                json!({ "from": order.status.as_str(), "to": next.as_str() }),
            ));
        }

        self.orders.update_status(id, next).await
    }
}
