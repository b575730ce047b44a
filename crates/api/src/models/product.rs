//! Product domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use pocket_market_core::{Cents, ProductId};

/// A catalog product.
///
/// Prices are whole cents; `stock` is kept non-negative by a database check
/// constraint and by the conditional decrement used during order creation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// URL-friendly unique slug.
    pub slug: String,
    /// Free-form description.
    pub description: String,
    /// Unit price in whole cents.
    pub price_cents: Cents,
    /// ISO 4217 currency code for the price.
    pub currency: String,
    /// Units available for sale.
    pub stock: i32,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
