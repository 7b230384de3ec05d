pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::{authenticate, AuthMiddleware, CredentialError};
pub use password::{hash_password, is_strong_password, verify_password};
pub use token::{Claims, TokenError, TokenService};

/// Message returned for every failed login, whatever the cause.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid email or password";

pub const WEAK_PASSWORD_MESSAGE: &str = "Password must be at least 8 characters long and contain a number, a special character, and an uppercase letter";

lazy_static! {
    static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if is_strong_password(password) {
        Ok(())
    } else {
        let mut error = ValidationError::new("weak_password");
        error.message = Some(Cow::Borrowed(WEAK_PASSWORD_MESSAGE));
        Err(error)
    }
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account. Compared case-sensitively.
    #[validate(regex(path = "EMAIL_REGEX", message = "Invalid email format"))]
    pub email: String,
    /// Password for the new account. Must pass the strength rule.
    #[validate(custom = "validate_password_strength")]
    pub password: String,
}

/// Represents the payload for a user login request.
///
/// Only presence is checked here; a malformed email simply fails to match a user.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The bearer token to present in the `Authorization` header.
    pub token: String,
}

/// Plain `{"message": "..."}` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
