//! Checkout validation handler.

use std::collections::HashMap;

use axum::{Json, extract::State};
use serde::Deserialize;

use pocket_market_core::ProductId;

use crate::db::products::ProductRepository;
use crate::error::AppError;
use crate::models::Product;
use crate::services::checkout::{CartLine, CartReport, validate_cart};
use crate::state::AppState;

/// Cart validation payload.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub items: Vec<CartLine>,
    pub currency: Option<String>,
}

/// Validate a cart against current catalog state.
///
/// Pure report with no side effects: returns the fulfillable lines with
/// subtotals, the rejected lines with reasons, and the grand total.
///
/// # Errors
///
/// Returns 400 for an empty cart or a non-positive quantity.
pub async fn validate_checkout(
    State(state): State<AppState>,
    Json(body): Json<ValidateRequest>,
) -> Result<Json<CartReport>, AppError> {
    if body.items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_owned()));
    }
    if body.items.iter().any(|line| line.quantity < 1) {
        return Err(AppError::BadRequest("Quantity must be >= 1".to_owned()));
    }

    let repo = ProductRepository::new(state.pool());

    // Snapshot the referenced products; unknown ids simply stay out of the
    // map and surface as not_found lines.
    let mut products: HashMap<ProductId, Product> = HashMap::new();
    for line in &body.items {
        if !products.contains_key(&line.product_id)
            && let Some(product) = repo.get_by_id(line.product_id).await?
        {
            products.insert(product.id, product);
        }
    }

    let currency = body.currency.unwrap_or_else(|| "USD".to_owned());
    let report = validate_cart(&products, &body.items, currency)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(report))
}
