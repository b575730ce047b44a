//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use pocket_market_core::{Email, UserId};

/// A shop user row.
///
/// The password hash lives in the same table but is kept out of this type;
/// credential checks go through the repository's dedicated hash lookup.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// User's email address (unique).
    pub email: Email,
    /// Whether this user may manage products.
    pub is_admin: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Public view of a user, safe to return from any endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UserPublic {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}
