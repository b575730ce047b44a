//! Product catalog handlers.
//!
//! Reads are public; every mutation requires an admin bearer token.
//! `PUT` replaces the whole resource (absent optional fields fall back to
//! defaults), `PATCH` applies only the fields present in the body.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use pocket_market_core::{Cents, CurrencyCode, ProductId};

use crate::db::products::{NewProduct, ProductPatch, ProductRepository};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Query parameters for product listing.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    /// Substring search over title/description.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Payload for create and full-replace operations.
#[derive(Debug, Deserialize)]
pub struct ProductBody {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub stock: i32,
}

fn default_currency() -> String {
    "USD".to_owned()
}

/// Payload for partial updates; only present fields are applied.
#[derive(Debug, Deserialize, Default)]
pub struct ProductPatchBody {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub currency: Option<String>,
    pub stock: Option<i32>,
}

impl ProductBody {
    fn validate(&self) -> Result<NewProduct, AppError> {
        if self.title.is_empty() {
            return Err(AppError::BadRequest("Title cannot be empty".to_owned()));
        }
        if self.slug.is_empty() {
            return Err(AppError::BadRequest("Slug cannot be empty".to_owned()));
        }
        let price_cents = Cents::new(self.price_cents);
        if !price_cents.is_non_negative() {
            return Err(AppError::BadRequest("Price cannot be negative".to_owned()));
        }
        if self.stock < 0 {
            return Err(AppError::BadRequest("Stock cannot be negative".to_owned()));
        }
        self.currency
            .parse::<CurrencyCode>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(NewProduct {
            title: self.title.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            price_cents,
            currency: self.currency.clone(),
            stock: self.stock,
        })
    }
}

impl ProductPatchBody {
    fn validate(&self) -> Result<ProductPatch, AppError> {
        if self.title.as_deref() == Some("") {
            return Err(AppError::BadRequest("Title cannot be empty".to_owned()));
        }
        if self.slug.as_deref() == Some("") {
            return Err(AppError::BadRequest("Slug cannot be empty".to_owned()));
        }
        let price_cents = self.price_cents.map(Cents::new);
        if price_cents.is_some_and(|p| !p.is_non_negative()) {
            return Err(AppError::BadRequest("Price cannot be negative".to_owned()));
        }
        if self.stock.is_some_and(|s| s < 0) {
            return Err(AppError::BadRequest("Stock cannot be negative".to_owned()));
        }
        if let Some(currency) = &self.currency {
            currency
                .parse::<CurrencyCode>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
        }

        Ok(ProductPatch {
            title: self.title.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            price_cents,
            currency: self.currency.clone(),
            stock: self.stock,
        })
    }
}

/// List products with optional search and pagination.
///
/// # Errors
///
/// Returns 500 for database failures.
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let products = ProductRepository::new(state.pool())
        .list(query.q.as_deref(), limit, offset)
        .await?;

    Ok(Json(products))
}

/// Get a product by ID.
///
/// # Errors
///
/// Returns 404 when the product doesn't exist.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}

/// Get a product by slug.
///
/// # Errors
///
/// Returns 404 when the product doesn't exist.
pub async fn get_product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}

/// Create a product.
///
/// # Errors
///
/// Returns 409 when the slug is taken and 400 for invalid fields.
pub async fn create_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<ProductBody>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let new = body.validate()?;

    let product = ProductRepository::new(state.pool()).create(&new).await?;

    tracing::info!(product_id = %product.id, slug = %product.slug, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Fully replace a product (PUT semantics).
///
/// # Errors
///
/// Returns 404 when the product doesn't exist and 409 on a slug conflict.
pub async fn replace_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductBody>,
) -> Result<Json<Product>, AppError> {
    let new = body.validate()?;

    let product = ProductRepository::new(state.pool()).replace(id, &new).await?;

    Ok(Json(product))
}

/// Partially update a product (PATCH semantics).
///
/// # Errors
///
/// Returns 404 when the product doesn't exist and 409 on a slug conflict.
pub async fn update_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductPatchBody>,
) -> Result<Json<Product>, AppError> {
    let patch = body.validate()?;

    let product = ProductRepository::new(state.pool()).update(id, &patch).await?;

    Ok(Json(product))
}

/// Delete a product.
///
/// # Errors
///
/// Returns 404 when the product doesn't exist.
pub async fn delete_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, AppError> {
    ProductRepository::new(state.pool()).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
