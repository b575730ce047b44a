//! Integration tests for file uploads and the notification endpoint.
//!
//! Run with: cargo test -p pocket-market-integration-tests -- --ignored

use pocket_market_integration_tests::{base_url, client};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_upload_multipart_file() {
    let client = client();
    let base_url = base_url();

    let form = Form::new()
        .text("description", "integration test upload")
        .part(
            "file",
            Part::bytes(b"hello from the integration suite".to_vec())
                .file_name("notes.txt")
                .mime_str("text/plain")
                .expect("Failed to set mime type"),
        );

    let resp = client
        .post(format!("{base_url}/uploads"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to upload file");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse upload response");
    assert_eq!(body.get("filename"), Some(&Value::from("notes.txt")));
    assert_eq!(body.get("size_bytes"), Some(&Value::from(32)));
    assert_eq!(
        body.get("description"),
        Some(&Value::from("integration test upload"))
    );
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_upload_without_file_is_rejected() {
    let client = client();
    let base_url = base_url();

    let form = Form::new().text("description", "no file attached");

    let resp = client
        .post(format!("{base_url}/uploads"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send upload request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Notify Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_notify_requires_api_key() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/notify?message=hello"))
        .send()
        .await
        .expect("Failed to call notify");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_notify_rejects_wrong_api_key() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/notify?message=hello"))
        .header("x-api-key", "definitely-not-the-key")
        .send()
        .await
        .expect("Failed to call notify");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running API server with PM_SERVICE_API_KEY configured"]
async fn test_notify_queues_with_valid_key() {
    let client = client();
    let base_url = base_url();
    let Ok(api_key) = std::env::var("PM_SERVICE_API_KEY") else {
        return; // Key not available to the test environment.
    };

    let resp = client
        .post(format!("{base_url}/notify?message=integration-test"))
        .header("x-api-key", api_key)
        .send()
        .await
        .expect("Failed to call notify");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse notify response");
    assert_eq!(body.get("status"), Some(&Value::from("queued")));
}
