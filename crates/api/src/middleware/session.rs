//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions for the
//! cookie-login routes.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "pm_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// The store's schema must already exist; `main` runs `store.migrate()`
/// at startup.
#[must_use]
pub fn create_session_layer(pool: &PgPool) -> (PostgresStore, SessionManagerLayer<PostgresStore>) {
    let store = PostgresStore::new(pool.clone());

    let layer = SessionManagerLayer::new(store.clone())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/");

    (store, layer)
}
