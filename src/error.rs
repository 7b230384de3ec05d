//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Business logic and the repositories return `AppError`, and the HTTP boundary turns it
//! into a status code plus a `{"error": "..."}` body through `actix_web::ResponseError`.
//!
//! Infrastructure failures (`DatabaseError`, `InternalServerError`) are logged with their
//! detail and rendered as an opaque 500 so nothing about the store leaks to clients.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors` and
//! `bcrypt::BcryptError` allow easy conversion using the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Body sent for every 500-class response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing, malformed, invalid or expired credentials (HTTP 401).
    /// The message never says which check failed; see `auth::middleware`.
    Unauthorized(String),
    /// Malformed request that could not be interpreted at all (HTTP 400).
    BadRequest(String),
    /// Input that was understood but failed validation rules (HTTP 400).
    ValidationError(String),
    /// The resource does not exist or belongs to someone else (HTTP 404).
    NotFound(String),
    /// The request collides with existing state, e.g. an email already registered (HTTP 409).
    Conflict(String),
    /// Unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Error originating from the database (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.as_str(),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                INTERNAL_ERROR_MESSAGE
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`; everything else is a `DatabaseError`.
/// Unique-constraint violations are translated by the repository that knows which
/// constraint was hit.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// Only each rule's message ends up in the body, never the rejected value.
/// Rules without a message fall back to `"<field> is invalid"`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        let mut fields: Vec<_> = error.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();

        AppError::ValidationError(messages.join("; "))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}

/// Returns true when a database error is a unique-constraint violation.
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some("23505"),
        _ => false,
    }
}
