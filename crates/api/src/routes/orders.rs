//! Order handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use pocket_market_core::{OrderId, ProductId};

use crate::db::orders::{OrderLine, OrderRepository};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::order::OrderWithItems;
use crate::state::AppState;

/// One requested order line.
#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Order creation payload.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub currency: Option<String>,
}

/// Place an order from validated cart lines.
///
/// Stock is decremented and price snapshots are taken inside a single
/// transaction; any invalid line fails the whole order.
///
/// # Errors
///
/// Returns 400 for an empty order or bad quantity, 404 for an unknown
/// product, and 409 when stock cannot cover a line.
pub async fn create_order(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderWithItems>), AppError> {
    if body.items.is_empty() {
        return Err(AppError::BadRequest("Empty order".to_owned()));
    }
    if body.items.iter().any(|item| item.quantity < 1) {
        return Err(AppError::BadRequest("Quantity must be >= 1".to_owned()));
    }

    let lines: Vec<OrderLine> = body
        .items
        .iter()
        .map(|item| OrderLine {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect();

    let currency = body.currency.unwrap_or_else(|| "USD".to_owned());

    let order = OrderRepository::new(state.pool())
        .create(user.id, &currency, &lines)
        .await?;

    tracing::info!(
        order_id = %order.id,
        user_id = %user.id,
        total_cents = order.total_cents.as_i64(),
        "order created"
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// List the caller's orders, newest first.
///
/// # Errors
///
/// Returns 500 for database failures.
pub async fn list_my_orders(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderWithItems>>, AppError> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(orders))
}

/// Get one of the caller's orders.
///
/// # Errors
///
/// Returns 404 when the order is absent or belongs to another user.
pub async fn get_my_order(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderWithItems>, AppError> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

    Ok(Json(order))
}
