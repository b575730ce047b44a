//! Process-time middleware.
//!
//! Adds an `X-Process-Time` header to every response with the elapsed
//! handler time in seconds.

use std::time::Instant;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// The HTTP header name for the elapsed time.
pub const PROCESS_TIME_HEADER: &str = "x-process-time";

/// Middleware that measures how long a request took to handle.
pub async fn process_time_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let mut response = next.run(request).await;

    let elapsed = start.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&format!("{elapsed:.6}")) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }

    response
}
