//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Users & auth
//! POST /users                  - Signup
//! POST /auth/token             - Issue bearer token (email + password)
//! GET  /auth/me                - Current user (bearer token)
//!
//! # Cookie sessions
//! POST /session/login          - Login, sets session cookie
//! GET  /session/me             - Who am I (session cookie)
//! POST /session/logout         - Clear session
//!
//! # Products
//! GET    /products             - List (q, limit, offset)
//! GET    /products/{id}        - Detail
//! GET    /products/slug/{slug} - Detail by slug
//! POST   /products             - Create (admin)
//! PUT    /products/{id}        - Full replace (admin)
//! PATCH  /products/{id}        - Partial update (admin)
//! DELETE /products/{id}        - Delete (admin)
//!
//! # Checkout & orders
//! POST /checkout/validate      - Cart validation report
//! POST /orders                 - Place order (bearer token)
//! GET  /orders                 - Caller's orders
//! GET  /orders/{id}            - One of the caller's orders
//!
//! # Service endpoints
//! POST /uploads                - Multipart file upload
//! POST /notify                 - Queue a notification (X-API-Key)
//! ```

pub mod auth;
pub mod checkout;
pub mod notify;
pub mod orders;
pub mod products;
pub mod session;
pub mod uploads;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::require_api_key;
use crate::state::AppState;

/// Create the application router.
///
/// Takes the state by value because the API-key middleware needs its own
/// handle to it.
pub fn routes(state: AppState) -> Router<AppState> {
    let notify_routes = Router::new()
        .route("/notify", post(notify::notify))
        .route_layer(axum::middleware::from_fn_with_state(state, require_api_key));

    Router::new()
        .route("/users", post(users::create_user))
        .route("/auth/token", post(auth::token))
        .route("/auth/me", get(auth::me))
        .route("/session/login", post(session::login))
        .route("/session/me", get(session::me))
        .route("/session/logout", post(session::logout))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::replace_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        .route("/products/slug/{slug}", get(products::get_product_by_slug))
        .route("/checkout/validate", post(checkout::validate_checkout))
        .route("/orders", get(orders::list_my_orders).post(orders::create_order))
        .route("/orders/{id}", get(orders::get_my_order))
        .route("/uploads", post(uploads::upload_file))
        .merge(notify_routes)
}
