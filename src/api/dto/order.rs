//! DTOs for the order endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::api::dto::pagination::{PageInfo, PaginationParams};
use crate::application::services::RequestedLine;
use crate::domain::entities::{Order, OrderItem};

/// Request to place an order.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub user_id: i64,

    #[validate(length(min = 1, max = 100))]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
}

/// One requested order line. Prices are never accepted from the client.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct OrderItemRequest {
    pub product_id: i64,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl CreateOrderRequest {
    pub fn into_lines(self) -> Vec<RequestedLine> {
        self.items
            .into_iter()
            .map(|item| RequestedLine {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect()
    }
}

/// Request to move an order to a new status.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

/// Listing filter: optional user plus pagination.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub user_id: Option<i64>,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// JSON representation of an order line.
#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            line_total_cents: item.line_total_cents(),
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price_cents: item.unit_price_cents,
        }
    }
}

/// JSON representation of an order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub user_id: i64,
    pub status: String,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            status: order.status.as_str().to_string(),
            total_cents: order.total_cents,
            created_at: order.created_at,
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Paginated order listing.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub items: Vec<OrderResponse>,
    pub pagination: PageInfo,
}
