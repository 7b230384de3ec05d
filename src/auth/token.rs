use crate::config::Config;
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How long an issued token stays valid.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Claims written into every token this service issues.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, wrong algorithm, or not a token at all.
    InvalidToken,
    /// The token's expiry has passed.
    Expired,
    /// The identity claim is missing or not an integer.
    MalformedClaims,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::InvalidToken => write!(f, "invalid token"),
            TokenError::Expired => write!(f, "token expired"),
            TokenError::MalformedClaims => write!(f, "malformed token claims"),
        }
    }
}

impl std::error::Error for TokenError {}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> AppError {
        AppError::Unauthorized("Invalid or expired token".into())
    }
}

/// Issues and verifies HS256-signed bearer tokens.
///
/// The service is a pure function of its secret: nothing is remembered between
/// calls, so there is no revocation short of expiry.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is rejected from the second its `exp` has passed.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret)
    }

    /// Overrides the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Generates a token for `user_id`, expiring after the configured lifetime.
    ///
    /// Returns `AppError::InternalServerError` if encoding fails.
    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies `token` and returns the user id it was issued for.
    ///
    /// Only HS256 is accepted; a token signed with any other algorithm is an
    /// `InvalidToken` even if the secret matches.
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        let data = decode::<HashMap<String, serde_json::Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::InvalidToken,
        })?;

        data.claims
            .get("sub")
            .and_then(serde_json::Value::as_i64)
            .ok_or(TokenError::MalformedClaims)
    }
}
