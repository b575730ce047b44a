//! Integration tests for the product catalog.
//!
//! Read endpoints are public; create/replace/update/delete require an
//! admin bearer token (`PM_ADMIN_EMAIL` / `PM_ADMIN_PASSWORD`).
//!
//! Run with: cargo test -p pocket-market-integration-tests -- --ignored

use pocket_market_integration_tests::{admin_token, authenticated_token, base_url, client};
use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

fn test_product_body(slug: &str) -> Value {
    json!({
        "title": "Integration Test Widget",
        "slug": slug,
        "description": "A widget created by the integration suite",
        "price_cents": 1999,
        "currency": "USD",
        "stock": 7,
    })
}

// ============================================================================
// Public Read Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_list_and_search() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse product list");
    assert!(body.is_array());

    let resp = client
        .get(format!("{base_url}/products?q=laptop&limit=5"))
        .send()
        .await
        .expect("Failed to search products");
    assert_eq!(resp.status(), StatusCode::OK);
    let hits: Value = resp.json().await.expect("Failed to parse search results");
    let hits = hits.as_array().expect("Search results should be an array");
    assert!(hits.len() <= 5);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_get_unknown_id_is_404() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/products/999999999"))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert!(body.get("message").is_some());
}

// ============================================================================
// Authorization Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_create_requires_admin() {
    let client = client();
    let base_url = base_url();
    let body = test_product_body(&format!("it-widget-{}", Uuid::new_v4()));

    // No token at all.
    let resp = client
        .post(format!("{base_url}/products"))
        .json(&body)
        .send()
        .await
        .expect("Failed to attempt create");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // A valid token for a non-admin user.
    let token = authenticated_token(&client).await;
    let resp = client
        .post(format!("{base_url}/products"))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .expect("Failed to attempt create");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Admin CRUD Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server, database, and admin credentials"]
async fn test_product_crud_lifecycle() {
    let client = client();
    let base_url = base_url();
    let Some(token) = admin_token(&client).await else {
        return; // No admin credentials in this environment.
    };

    let slug = format!("it-widget-{}", Uuid::new_v4());

    // Create.
    let resp = client
        .post(format!("{base_url}/products"))
        .bearer_auth(&token)
        .json(&test_product_body(&slug))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.expect("Failed to parse created product");
    let id = created
        .get("id")
        .and_then(Value::as_i64)
        .expect("Created product missing id");

    // Creating the same slug again conflicts.
    let resp = client
        .post(format!("{base_url}/products"))
        .bearer_auth(&token)
        .json(&test_product_body(&slug))
        .send()
        .await
        .expect("Failed to attempt duplicate create");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Lookup by slug matches lookup by id.
    let resp = client
        .get(format!("{base_url}/products/slug/{slug}"))
        .send()
        .await
        .expect("Failed to get product by slug");
    assert_eq!(resp.status(), StatusCode::OK);
    let by_slug: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(by_slug.get("id").and_then(Value::as_i64), Some(id));

    // PUT replaces every field.
    let mut replacement = test_product_body(&slug);
    replacement["title"] = Value::from("Replaced Widget");
    replacement["price_cents"] = Value::from(2499);
    let resp = client
        .put(format!("{base_url}/products/{id}"))
        .bearer_auth(&token)
        .json(&replacement)
        .send()
        .await
        .expect("Failed to replace product");
    assert_eq!(resp.status(), StatusCode::OK);
    let replaced: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(replaced.get("title"), Some(&Value::from("Replaced Widget")));
    assert_eq!(replaced.get("price_cents"), Some(&Value::from(2499)));

    // PATCH touches only the provided fields.
    let resp = client
        .patch(format!("{base_url}/products/{id}"))
        .bearer_auth(&token)
        .json(&json!({ "stock": 42 }))
        .send()
        .await
        .expect("Failed to patch product");
    assert_eq!(resp.status(), StatusCode::OK);
    let patched: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(patched.get("stock"), Some(&Value::from(42)));
    assert_eq!(patched.get("title"), Some(&Value::from("Replaced Widget")));

    // Delete, then the product is gone.
    let resp = client
        .delete(format!("{base_url}/products/{id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base_url}/products/{id}"))
        .send()
        .await
        .expect("Failed to get deleted product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server, database, and admin credentials"]
async fn test_product_create_rejects_negative_price() {
    let client = client();
    let base_url = base_url();
    let Some(token) = admin_token(&client).await else {
        return;
    };

    let mut body = test_product_body(&format!("it-widget-{}", Uuid::new_v4()));
    body["price_cents"] = Value::from(-100);

    let resp = client
        .post(format!("{base_url}/products"))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .expect("Failed to attempt create");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
