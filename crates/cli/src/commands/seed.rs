//! Seed the catalog from a YAML file.
//!
//! Reads product definitions, validates them, and inserts whatever isn't
//! already present (matched by slug). Existing products are left untouched,
//! so re-running the seed is safe.

use std::path::Path;

use secrecy::ExposeSecret;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{error, info};

use pocket_market_core::{Cents, CurrencyCode};

/// One product definition in the seed file.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    title: String,
    slug: String,
    #[serde(default)]
    description: String,
    price_cents: i64,
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(default)]
    stock: i32,
}

fn default_currency() -> String {
    "USD".to_owned()
}

fn validate(products: &[SeedProduct]) -> Vec<String> {
    let mut errors = Vec::new();
    for (i, p) in products.iter().enumerate() {
        if p.title.is_empty() {
            errors.push(format!("product {i}: empty title"));
        }
        if p.slug.is_empty() {
            errors.push(format!("product {i}: empty slug"));
        }
        if !Cents::new(p.price_cents).is_non_negative() {
            errors.push(format!("product {i} ({}): negative price", p.slug));
        }
        if p.stock < 0 {
            errors.push(format!("product {i} ({}): negative stock", p.slug));
        }
        if p.currency.parse::<CurrencyCode>().is_err() {
            errors.push(format!(
                "product {i} ({}): unsupported currency {}",
                p.slug, p.currency
            ));
        }
    }
    errors
}

/// Seed products from a YAML file.
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file cannot
/// be read or validated, or a database operation fails.
pub async fn products(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url()?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading products from file");

    // Read and validate YAML before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let seed: Vec<SeedProduct> = serde_yaml::from_str(&content)?;

    info!(products = seed.len(), "Parsed seed file");

    let errors = validate(&seed);
    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let pool = PgPool::connect(database_url.expose_secret()).await?;
    info!("Connected to database");

    let mut inserted = 0_u32;
    let mut skipped = 0_u32;

    for product in &seed {
        let result = sqlx::query(
            "INSERT INTO products (title, slug, description, price_cents, currency, stock)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(&product.title)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.currency)
        .bind(product.stock)
        .execute(&pool)
        .await?;

        if result.rows_affected() == 0 {
            skipped += 1;
        } else {
            inserted += 1;
        }
    }

    info!(inserted, skipped, "Seeding complete");
    Ok(())
}
