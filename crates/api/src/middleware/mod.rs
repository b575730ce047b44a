//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Session layer (tower-sessions with `PostgreSQL` store)
//! 2. Request ID (add unique ID to each request)
//! 3. Process time (add `X-Process-Time` to each response)
//! 4. `TraceLayer` (request tracing)
//! 5. CORS (allow-list from config)
//!
//! Route-scoped: bearer-auth extractors on orders and product mutations,
//! `X-API-Key` check on service endpoints.

pub mod api_key;
pub mod auth;
pub mod process_time;
pub mod request_id;
pub mod session;

pub use api_key::require_api_key;
pub use auth::{AuthUser, RequireAdmin, RequireAuth};
pub use process_time::process_time_middleware;
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
