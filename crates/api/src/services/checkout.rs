//! Cart validation logic.
//!
//! Partitions a cart into valid and invalid lines against a product snapshot
//! and computes the grand total. This is a pure report with no side effects;
//! the route handler fetches the products and this module does the rest, so
//! the partitioning rules are unit-testable without a database.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use pocket_market_core::{Cents, MoneyError, ProductId};

use crate::models::Product;

/// One requested cart line.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Why a cart line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    NotFound,
    InsufficientStock,
}

/// A cart line that can be fulfilled.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedLine {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price_cents: Cents,
    pub quantity: i32,
    pub subtotal_cents: Cents,
    pub stock_available: i32,
    pub currency: String,
}

/// A cart line that cannot be fulfilled, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidLine {
    pub product_id: ProductId,
    pub quantity: i32,
    pub reason: InvalidReason,
}

/// The full validation report for a cart.
#[derive(Debug, Clone, Serialize)]
pub struct CartReport {
    pub currency: String,
    pub items: Vec<ValidatedLine>,
    pub invalid_items: Vec<InvalidLine>,
    pub total_cents: Cents,
}

/// Validate cart lines against a product snapshot.
///
/// Each line is checked independently: an unknown product id is reported as
/// [`InvalidReason::NotFound`], a quantity above available stock as
/// [`InvalidReason::InsufficientStock`]. Valid lines accumulate into
/// `total_cents`.
///
/// # Errors
///
/// Returns [`MoneyError::Overflow`] if a subtotal or the total overflows.
pub fn validate_cart(
    products: &HashMap<ProductId, Product>,
    lines: &[CartLine],
    currency: String,
) -> Result<CartReport, MoneyError> {
    let mut items = Vec::new();
    let mut invalid_items = Vec::new();
    let mut total = Cents::ZERO;

    for line in lines {
        let Some(product) = products.get(&line.product_id) else {
            invalid_items.push(InvalidLine {
                product_id: line.product_id,
                quantity: line.quantity,
                reason: InvalidReason::NotFound,
            });
            continue;
        };

        if line.quantity > product.stock {
            invalid_items.push(InvalidLine {
                product_id: line.product_id,
                quantity: line.quantity,
                reason: InvalidReason::InsufficientStock,
            });
            continue;
        }

        let subtotal = product.price_cents.checked_mul(i64::from(line.quantity))?;
        total = total.checked_add(subtotal)?;

        items.push(ValidatedLine {
            product_id: product.id,
            title: product.title.clone(),
            unit_price_cents: product.price_cents,
            quantity: line.quantity,
            subtotal_cents: subtotal,
            stock_available: product.stock,
            currency: product.currency.clone(),
        });
    }

    Ok(CartReport {
        currency,
        items,
        invalid_items,
        total_cents: total,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn product(id: i32, price: i64, stock: i32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            slug: format!("product-{id}"),
            description: String::new(),
            price_cents: Cents::new(price),
            currency: "USD".to_owned(),
            stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn snapshot(products: Vec<Product>) -> HashMap<ProductId, Product> {
        products.into_iter().map(|p| (p.id, p)).collect()
    }

    fn line(product_id: i32, quantity: i32) -> CartLine {
        CartLine {
            product_id: ProductId::new(product_id),
            quantity,
        }
    }

    #[test]
    fn computes_subtotals_and_total() {
        let products = snapshot(vec![product(1, 1250, 10), product(2, 500, 3)]);
        let report =
            validate_cart(&products, &[line(1, 2), line(2, 3)], "USD".to_owned()).unwrap();

        assert_eq!(report.items.len(), 2);
        assert!(report.invalid_items.is_empty());
        assert_eq!(report.items[0].subtotal_cents, Cents::new(2500));
        assert_eq!(report.items[1].subtotal_cents, Cents::new(1500));
        assert_eq!(report.total_cents, Cents::new(4000));
    }

    #[test]
    fn unknown_product_is_reported_not_found() {
        let products = snapshot(vec![product(1, 100, 5)]);
        let report = validate_cart(&products, &[line(99, 1)], "USD".to_owned()).unwrap();

        assert!(report.items.is_empty());
        assert_eq!(report.invalid_items.len(), 1);
        assert_eq!(report.invalid_items[0].reason, InvalidReason::NotFound);
        assert_eq!(report.total_cents, Cents::ZERO);
    }

    #[test]
    fn over_stock_quantity_is_reported() {
        let products = snapshot(vec![product(1, 100, 2)]);
        let report = validate_cart(&products, &[line(1, 3)], "USD".to_owned()).unwrap();

        assert_eq!(report.invalid_items.len(), 1);
        assert_eq!(
            report.invalid_items[0].reason,
            InvalidReason::InsufficientStock
        );
    }

    #[test]
    fn quantity_equal_to_stock_is_valid() {
        let products = snapshot(vec![product(1, 100, 2)]);
        let report = validate_cart(&products, &[line(1, 2)], "USD".to_owned()).unwrap();

        assert_eq!(report.items.len(), 1);
        assert!(report.invalid_items.is_empty());
    }

    #[test]
    fn mixed_cart_partitions_both_ways() {
        let products = snapshot(vec![product(1, 1999, 1), product(2, 300, 0)]);
        let report = validate_cart(
            &products,
            &[line(1, 1), line(2, 1), line(42, 1)],
            "USD".to_owned(),
        )
        .unwrap();

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.invalid_items.len(), 2);
        assert_eq!(report.total_cents, Cents::new(1999));
    }

    #[test]
    fn invalid_lines_do_not_count_toward_total() {
        let products = snapshot(vec![product(1, 700, 10), product(2, 9999, 0)]);
        let report =
            validate_cart(&products, &[line(1, 1), line(2, 5)], "USD".to_owned()).unwrap();

        assert_eq!(report.total_cents, Cents::new(700));
    }

    #[test]
    fn subtotal_overflow_is_an_error() {
        let products = snapshot(vec![product(1, i64::MAX, i32::MAX)]);
        let result = validate_cart(&products, &[line(1, 2)], "USD".to_owned());
        assert_eq!(result.unwrap_err(), MoneyError::Overflow);
    }
}
