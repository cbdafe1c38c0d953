//! Handlers for the order endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::json;
use validator::Validate;

use crate::api::dto::order::{
    CreateOrderRequest, OrderListQuery, OrderListResponse, OrderResponse,
    UpdateOrderStatusRequest,
};
use crate::api::dto::pagination::PageInfo;
use crate::api::extract::Json;
use crate::domain::entities::OrderStatus;
use crate::error::AppError;
use crate::state::AppState;

/// Places an order.
///
/// # Endpoint
///
/// `POST /api/orders`
///
/// Unit prices and the total are computed server-side from the catalog.
///
/// # Errors
///
/// 400 on validation failure, 404 for unknown user/product, 409 when
/// stock is insufficient.
pub async fn create_order_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, axum::Json<OrderResponse>), AppError> {
    payload.validate()?;

    let user_id = payload.user_id;
    let order = state
        .order_service
        .place_order(user_id, payload.into_lines())
        .await?;

    Ok((StatusCode::CREATED, axum::Json(order.into())))
}

/// Lists orders, optionally filtered to one user.
///
/// # Endpoint
///
/// `GET /api/orders?user_id=7&page=1&page_size=20`
pub async fn list_orders_handler(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<axum::Json<OrderListResponse>, AppError> {
    let page = query
        .pagination
        .validate_and_resolve()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (orders, total) = state
        .order_service
        .list_orders(query.user_id, page.offset, page.limit)
        .await?;

    Ok(axum::Json(OrderListResponse {
        items: orders.into_iter().map(Into::into).collect(),
        pagination: PageInfo {
            page: page.page,
            page_size: page.page_size,
            total,
        },
    }))
}

/// Fetches one order with its line items.
///
/// # Endpoint
///
/// `GET /api/orders/{id}`
pub async fn get_order_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<axum::Json<OrderResponse>, AppError> {
    let order = state.order_service.get_order(id).await?;
    Ok(axum::Json(order.into()))
}

/// Moves an order to a new lifecycle status.
///
/// # Endpoint
///
/// `PATCH /api/orders/{id}`
///
/// # Errors
///
/// 400 for an unknown status token, 409 for a disallowed transition.
pub async fn update_order_status_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<axum::Json<OrderResponse>, AppError> {
    let next = OrderStatus::parse(&payload.status).ok_or_else(|| {
        AppError::bad_request("Unknown order status", json!({ "status": payload.status }))
    })?;

    let order = state.order_service.update_status(id, next).await?;
    Ok(axum::Json(order.into()))
}
