//! Order repository for database operations.
//!
//! Order creation is fully transactional: stock is decremented with a
//! conditional update (`stock >= quantity`), so two concurrent orders for the
//! last unit cannot both succeed. Any failing line rolls back the whole order.
//! Product rows are locked in ascending id order regardless of how the caller
//! listed them, so concurrent multi-line orders cannot deadlock.

use sqlx::PgPool;

use pocket_market_core::{Cents, MoneyError, OrderId, OrderStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::order::{Order, OrderItem, OrderWithItems};

/// One requested line of a new order.
#[derive(Debug, Clone, Copy)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Errors from order creation.
#[derive(Debug, thiserror::Error)]
pub enum OrderCreateError {
    /// A requested product does not exist.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Requested quantity exceeds available stock.
    #[error("insufficient stock for product {0}")]
    InsufficientStock(ProductId),

    /// Subtotal or total arithmetic overflowed.
    #[error("order total overflow: {0}")]
    Money(#[from] MoneyError),

    /// Underlying database error.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for OrderCreateError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Sort lines by product id and merge duplicates.
///
/// Row locks below are taken in this canonical order, so two concurrent
/// orders can never hold each other's locks and deadlock.
fn merge_lines(lines: &[OrderLine]) -> Result<Vec<OrderLine>, OrderCreateError> {
    let mut sorted = lines.to_vec();
    sorted.sort_by_key(|line| line.product_id.as_i32());

    let mut merged: Vec<OrderLine> = Vec::with_capacity(sorted.len());
    for line in sorted {
        match merged.last_mut() {
            Some(last) if last.product_id == line.product_id => {
                last.quantity = last
                    .quantity
                    .checked_add(line.quantity)
                    .ok_or(OrderCreateError::InsufficientStock(line.product_id))?;
            }
            _ => merged.push(line),
        }
    }
    Ok(merged)
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its items, snapshotting unit prices and
    /// decrementing stock, all in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns `OrderCreateError::ProductNotFound` or `InsufficientStock`
    /// for invalid lines (the transaction is rolled back), `Money` on
    /// arithmetic overflow, and `Repository` for database failures.
    pub async fn create(
        &self,
        user_id: UserId,
        currency: &str,
        lines: &[OrderLine],
    ) -> Result<OrderWithItems, OrderCreateError> {
        let lines = merge_lines(lines)?;

        let mut tx = self.pool.begin().await?;

        let mut total = Cents::ZERO;
        let mut priced: Vec<(OrderLine, Cents)> = Vec::with_capacity(lines.len());

        for line in &lines {
            // Lock the row so the price snapshot and the decrement below
            // see the same product state.
            let unit_price: Option<Cents> = sqlx::query_scalar(
                "SELECT price_cents FROM products WHERE id = $1 FOR UPDATE",
            )
            .bind(line.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(unit_price) = unit_price else {
                return Err(OrderCreateError::ProductNotFound(line.product_id));
            };

            let decremented = sqlx::query(
                "UPDATE products
                 SET stock = stock - $2, updated_at = now()
                 WHERE id = $1 AND stock >= $2",
            )
            .bind(line.product_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;

            if decremented.rows_affected() == 0 {
                return Err(OrderCreateError::InsufficientStock(line.product_id));
            }

            let subtotal = unit_price.checked_mul(i64::from(line.quantity))?;
            total = total.checked_add(subtotal)?;
            priced.push((*line, unit_price));
        }

        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (user_id, status, total_cents, currency)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, status, total_cents, currency, created_at",
        )
        .bind(user_id)
        .bind(OrderStatus::Created)
        .bind(total)
        .bind(currency)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(priced.len());
        for (line, unit_price) in &priced {
            let item = sqlx::query_as::<_, OrderItem>(
                "INSERT INTO order_items (order_id, product_id, unit_price_cents, quantity)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, order_id, product_id, unit_price_cents, quantity",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(*unit_price)
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item);
        }

        tx.commit().await?;

        Ok(OrderWithItems::new(order, items))
    }

    /// List a user's orders, newest first, with their items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, status, total_cents, currency, created_at
             FROM orders WHERE user_id = $1 ORDER BY id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.items_for(order.id).await?;
            result.push(OrderWithItems::new(order, items));
        }

        Ok(result)
    }

    /// Get one of a user's orders by ID.
    ///
    /// Returns `None` when the order is absent or belongs to another user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_for_user(
        &self,
        order_id: OrderId,
        user_id: UserId,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, status, total_cents, currency, created_at
             FROM orders WHERE id = $1 AND user_id = $2",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        match order {
            Some(order) => {
                let items = self.items_for(order.id).await?;
                Ok(Some(OrderWithItems::new(order, items)))
            }
            None => Ok(None),
        }
    }

    async fn items_for(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, unit_price_cents, quantity
             FROM order_items WHERE order_id = $1 ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}
