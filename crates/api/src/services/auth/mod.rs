//! Authentication service.
//!
//! Provides signup, password login, and bearer-token issue/verify.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use pocket_market_core::{Email, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Bearer-token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string per JWT convention.
    pub sub: String,
    /// Email at issue time.
    pub email: String,
    /// Whether the user was an admin at issue time.
    pub is_admin: bool,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

impl Claims {
    /// The user id this token was issued for.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the subject is not a numeric id.
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.sub
            .parse::<i32>()
            .map(UserId::new)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Authentication service.
///
/// Handles user registration, login, and token issue/verify.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(first_name, last_name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }
}

// =============================================================================
// Passwords
// =============================================================================

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with argon2 and a fresh salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password is wrong or the
/// stored hash is unparseable.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

// =============================================================================
// Tokens
// =============================================================================

/// Issue a signed bearer token for a user.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if encoding fails.
pub fn issue_token(
    user: &User,
    secret: &SecretString,
    expiry_minutes: i64,
) -> Result<String, AuthError> {
    let exp = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::minutes(expiry_minutes))
        .ok_or(AuthError::InvalidToken)?
        .timestamp();

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.to_string(),
        is_admin: user.is_admin,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Decode and verify a bearer token, checking signature and expiry.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` on any decode failure.
pub fn verify_token(token: &str, secret: &SecretString) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use pocket_market_core::Email;

    use super::*;

    fn test_user() -> User {
        User {
            id: UserId::new(7),
            first_name: "Ana".to_owned(),
            last_name: "García".to_owned(),
            email: Email::parse("ana@example.com").unwrap(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    fn test_secret() -> SecretString {
        SecretString::from("kQ9#vL2$mN8@pR4!wX6%yZ1&tB3*cD5^")
    }

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn rejects_short_password() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn token_round_trip() {
        let user = test_user();
        let secret = test_secret();

        let token = issue_token(&user, &secret, 30).unwrap();
        let claims = verify_token(&token, &secret).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.email, "ana@example.com");
        assert!(!claims.is_admin);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let user = test_user();
        let token = issue_token(&user, &test_secret(), 30).unwrap();

        let other = SecretString::from("zF4!rG7@hJ2#kL9$mQ6%nS1&pT8*vW3^");
        assert!(matches!(
            verify_token(&token, &other),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let user = test_user();
        let secret = test_secret();

        // Issued already expired (negative lifetime, beyond default leeway)
        let token = issue_token(&user, &secret, -10).unwrap();
        assert!(matches!(
            verify_token(&token, &secret),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(matches!(
            verify_token("not-a-token", &test_secret()),
            Err(AuthError::InvalidToken)
        ));
    }
}
