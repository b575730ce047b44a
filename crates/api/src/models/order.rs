//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use pocket_market_core::{Cents, OrderId, OrderItemId, OrderStatus, ProductId, UserId};

/// An order header row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// User who placed the order.
    pub user_id: UserId,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Sum of item subtotals at creation time.
    pub total_cents: Cents,
    /// ISO 4217 currency code for the total.
    pub currency: String,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// A single line of an order.
///
/// `unit_price_cents` is a snapshot of the product price at order time;
/// later catalog price changes do not affect existing orders.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
    /// Unique item ID.
    pub id: OrderItemId,
    /// Parent order.
    pub order_id: OrderId,
    /// The ordered product.
    pub product_id: ProductId,
    /// Unit price snapshot in whole cents.
    pub unit_price_cents: Cents,
    /// Units ordered (>= 1).
    pub quantity: i32,
}

/// An order with its items, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total_cents: Cents,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

impl OrderWithItems {
    /// Attach item rows to an order header.
    #[must_use]
    pub fn new(order: Order, items: Vec<OrderItem>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            status: order.status,
            total_cents: order.total_cents,
            currency: order.currency,
            created_at: order.created_at,
            items,
        }
    }
}
