//! Repository trait for orders.

use crate::domain::entities::{NewOrder, Order, OrderStatus};
use crate::error::AppError;
use async_trait::async_trait;

/// Data access contract for orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a priced order and its line items.
    ///
    /// The implementation must atomically decrement product stock for
    /// every line and abort the whole order when any product has fewer
    /// units than requested.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when stock is insufficient,
    /// [`AppError::Database`] on storage failure.
    async fn create(&self, new_order: NewOrder) -> Result<Order, AppError>;

    /// Finds an order (with items) by id. `Ok(None)` when absent.
    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError>;

    /// Lists orders (with items) newest first, optionally for one user.
    async fn list(
        &self,
        user_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, AppError>;

    /// Counts orders, optionally for one user.
    async fn count(&self, user_id: Option<i64>) -> Result<i64, AppError>;

    /// Overwrites the status of an order.
    ///
    /// Transition legality is the order service's concern; this method
    /// only writes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no order matches `id`.
    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, AppError>;
}
