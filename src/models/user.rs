use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A registered account.
///
/// `password_hash` only ever holds a bcrypt hash and is never serialized.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A user ready to be inserted. Built by the credential store after hashing.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}
