//! Domain models and request/response schemas.

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderItem};
pub use product::Product;
pub use user::User;

/// Session keys used by the cookie-session login routes.
pub mod session_keys {
    /// Session key holding the logged-in user's id.
    pub const CURRENT_USER: &str = "current_user";
}
