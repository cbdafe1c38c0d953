//! Handlers for the product catalog endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::{PageInfo, PaginationParams};
use crate::api::dto::product::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};
use crate::api::extract::Json;
use crate::error::AppError;
use crate::state::AppState;

/// Lists catalog products.
///
/// # Endpoint
///
/// `GET /api/products?page=1&page_size=20`
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<axum::Json<ProductListResponse>, AppError> {
    let page = params
        .validate_and_resolve()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (products, total) = state
        .catalog_service
        .list_products(page.offset, page.limit)
        .await?;

    Ok(axum::Json(ProductListResponse {
        items: products.into_iter().map(Into::into).collect(),
        pagination: PageInfo {
            page: page.page,
            page_size: page.page_size,
            total,
        },
    }))
}

/// Adds a product to the catalog.
///
/// # Endpoint
///
/// `POST /api/products`
///
/// # Errors
///
/// 400 on validation failure, 409 when the SKU is already taken.
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, axum::Json<ProductResponse>), AppError> {
    payload.validate()?;

    let product = state
        .catalog_service
        .create_product(payload.into_new_product())
        .await?;

    Ok((StatusCode::CREATED, axum::Json(product.into())))
}

/// Fetches one product.
///
/// # Endpoint
///
/// `GET /api/products/{id}`
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<axum::Json<ProductResponse>, AppError> {
    let product = state.catalog_service.get_product(id).await?;
    Ok(axum::Json(product.into()))
}

/// Partially updates a product.
///
/// # Endpoint
///
/// `PATCH /api/products/{id}`
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<axum::Json<ProductResponse>, AppError> {
    payload.validate()?;

    let product = state
        .catalog_service
        .update_product(id, payload.into_patch())
        .await?;

    Ok(axum::Json(product.into()))
}

/// Removes a product from the catalog.
///
/// # Endpoint
///
/// `DELETE /api/products/{id}`
///
/// # Errors
///
/// 404 for an unknown id, 409 when order lines still reference it.
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.catalog_service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
