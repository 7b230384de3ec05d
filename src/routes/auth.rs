use crate::{
    auth::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse, TokenService},
    error::AppError,
    services::CredentialStore,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Validates the email shape and password strength, then stores the account.
///
/// ## Responses:
/// - `201 Created`: `{"message": "User registered successfully"}`.
/// - `400 Bad Request`: Malformed body, invalid email or weak password.
/// - `409 Conflict`: The email is already registered.
#[post("/register")]
pub async fn register(
    credentials: web::Data<CredentialStore>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    if credentials
        .find_by_email(&register_data.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User already exists".into()));
    }

    // A concurrent registration can still win here; the store reports it as a conflict.
    credentials
        .create(&register_data.email, &register_data.password)
        .await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: "User registered successfully".into(),
    }))
}

/// Login user
///
/// Checks the credentials and returns a bearer token valid for 24 hours.
///
/// ## Responses:
/// - `200 OK`: `{"token": "..."}`.
/// - `400 Bad Request`: Malformed body or empty fields.
/// - `401 Unauthorized`: `{"error": "Invalid email or password"}`.
#[post("/login")]
pub async fn login(
    credentials: web::Data<CredentialStore>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = credentials
        .verify_login(&login_data.email, &login_data.password)
        .await?;
    let token = tokens.issue(user.id)?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
