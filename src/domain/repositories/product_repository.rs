//! Repository trait for catalog products.

use crate::domain::entities::{NewProduct, Product, ProductPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Data access contract for the product catalog.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProductRepository`]
/// - Test mocks generated with `mockall`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the SKU already exists,
    /// [`AppError::Database`] on storage failure.
    async fn create(&self, new_product: NewProduct) -> Result<Product, AppError>;

    /// Finds a product by id. `Ok(None)` when absent.
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError>;

    /// Lists products ordered by id.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>, AppError>;

    /// Counts all products.
    async fn count(&self) -> Result<i64, AppError>;

    /// Partially updates a product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no product matches `id`.
    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Product, AppError>;

    /// Deletes a product. Returns `Ok(false)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the product is referenced by an
    /// existing order line.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
