//! Order entity and status lifecycle.

use chrono::{DateTime, Utc};

/// Lifecycle state of an order.
///
/// Allowed transitions: `Pending -> Paid -> Shipped`, with `Cancelled`
/// reachable from `Pending` and `Paid`. `Shipped` and `Cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    /// Wire and storage token for the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status token; returns `None` for unknown tokens.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "shipped" => Some(Self::Shipped),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether an order may move from `self` to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Paid)
                | (Self::Pending, Self::Cancelled)
                | (Self::Paid, Self::Shipped)
                | (Self::Paid, Self::Cancelled)
        )
    }
}

/// A placed order with its line items.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// A single order line.
///
/// `unit_price_cents` is the catalog price captured at placement time;
/// later catalog changes do not affect existing orders.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

impl OrderItem {
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }
}

/// Input data for persisting a new order.
///
/// Items are already priced and the total computed by the order service.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub total_cents: i64,
    pub items: Vec<OrderItem>,
}
