//! Integration tests for Pocket Market.
//!
//! These tests exercise the HTTP API of a running `pocket-market-api`
//! server and are `#[ignore]`d by default so that `cargo test` stays
//! hermetic.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! pm-cli migrate
//!
//! # Start the API server
//! cargo run -p pocket-market-api
//!
//! # Run the integration suite
//! cargo test -p pocket-market-integration-tests -- --ignored
//! ```
//!
//! The target server is configurable via `PM_BASE_URL` (defaults to
//! `http://localhost:8000`). Tests that hit admin-only routes expect a
//! user with `is_admin = true`; credentials come from `PM_ADMIN_EMAIL`
//! and `PM_ADMIN_PASSWORD`.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("PM_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Build an HTTP client with a cookie store, for session-based tests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Register a fresh user and return `(email, password)`.
///
/// # Panics
///
/// Panics if the signup request fails.
pub async fn signup(client: &Client) -> (String, String) {
    let base_url = base_url();
    let email = format!("integration-test-{}@example.com", Uuid::new_v4());
    let password = "correct-horse-battery".to_string();

    let resp = client
        .post(format!("{base_url}/users"))
        .json(&json!({
            "first_name": "Integration",
            "last_name": "Test",
            "email": email,
            "password": password,
        }))
        .send()
        .await
        .expect("Failed to sign up test user");
    assert_eq!(resp.status(), 201, "signup should return 201 Created");

    (email, password)
}

/// Exchange credentials for a bearer token via `POST /auth/token`.
///
/// # Panics
///
/// Panics if the token request fails or the response has no token.
pub async fn bearer_token(client: &Client, email: &str, password: &str) -> String {
    let base_url = base_url();
    let resp = client
        .post(format!("{base_url}/auth/token"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to request token");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("Failed to parse token response");
    assert_eq!(body.get("token_type"), Some(&json!("bearer")));
    body.get("access_token")
        .and_then(Value::as_str)
        .expect("Token response missing access_token")
        .to_string()
}

/// Sign up a fresh user and return a bearer token for them.
pub async fn authenticated_token(client: &Client) -> String {
    let (email, password) = signup(client).await;
    bearer_token(client, &email, &password).await
}

/// Bearer token for the admin user named in the environment, if any.
///
/// Returns `None` when `PM_ADMIN_EMAIL` / `PM_ADMIN_PASSWORD` are not
/// set, letting admin tests skip gracefully.
pub async fn admin_token(client: &Client) -> Option<String> {
    let email = std::env::var("PM_ADMIN_EMAIL").ok()?;
    let password = std::env::var("PM_ADMIN_PASSWORD").ok()?;
    Some(bearer_token(client, &email, &password).await)
}
