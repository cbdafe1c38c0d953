//! Catalog management service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewProduct, Product, ProductPatch};
use crate::domain::repositories::ProductRepository;
use crate::error::AppError;

/// Service for managing catalog products.
pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the SKU is already taken.
    pub async fn create_product(&self, new_product: NewProduct) -> Result<Product, AppError> {
        self.products.create(new_product).await
    }

    /// Fetches a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id does not exist.
    pub async fn get_product(&self, id: i64) -> Result<Product, AppError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found", json!({ "id": id })))
    }

    /// Lists a page of products together with the total count.
    pub async fn list_products(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), AppError> {
        let products = self.products.list(offset, limit).await?;
        let total = self.products.count().await?;
        Ok((products, total))
    }

    /// Applies a partial update to a product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty patch,
    /// [`AppError::NotFound`] when the id does not exist.
    pub async fn update_product(&self, id: i64, patch: ProductPatch) -> Result<Product, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "Update requires at least one field",
                json!({}),
            ));
        }

        self.products.update(id, patch).await
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id does not exist,
    /// [`AppError::Conflict`] when order lines still reference it.
    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        if !self.products.delete(id).await? {
            return Err(AppError::not_found("Product not found", json!({ "id": id })));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::product_repository::MockProductRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn sample_product(id: i64) -> Product {
        Product {
            id,
            sku: format!("SKU-{id}"),
            name: "Widget".to_string(),
            description: None,
            price_cents: 1_999,
            stock_quantity: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn get_product_maps_missing_to_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = CatalogService::new(Arc::new(repo));
        let err = service.get_product(42).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn empty_patch_is_rejected_without_touching_storage() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().never();

        let service = CatalogService::new(Arc::new(repo));
        let err = service
            .update_product(1, ProductPatch::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn delete_of_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().with(eq(7)).returning(|_| Ok(false));

        let service = CatalogService::new(Arc::new(repo));
        let err = service.delete_product(7).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_returns_page_and_total() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .with(eq(0), eq(20))
            .returning(|_, _| Ok(vec![sample_product(1), sample_product(2)]));
        repo.expect_count().returning(|| Ok(9));

        let service = CatalogService::new(Arc::new(repo));
        let (page, total) = service.list_products(0, 20).await.unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(total, 9);
    }
}
