use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderValue, AUTHORIZATION},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::fmt;

use crate::auth::extractors::AuthenticatedUserId;
use crate::auth::token::TokenService;
use crate::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Why a request was turned away by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// No `Authorization` header.
    MissingCredential,
    /// The header does not start with `Bearer `.
    MalformedCredential,
    /// The token failed verification. Expired, forged and malformed tokens all land here.
    InvalidCredential,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CredentialError::MissingCredential => write!(f, "Authorization header missing"),
            CredentialError::MalformedCredential => {
                write!(f, "Invalid Authorization header format")
            }
            CredentialError::InvalidCredential => write!(f, "Invalid or expired token"),
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(error: CredentialError) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

/// Resolves the caller's identity from an `Authorization` header value.
pub fn authenticate(
    header: Option<&HeaderValue>,
    tokens: &TokenService,
) -> Result<AuthenticatedUserId, CredentialError> {
    let header = header.ok_or(CredentialError::MissingCredential)?;
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(CredentialError::MalformedCredential)?;

    tokens
        .verify(token)
        .map(AuthenticatedUserId)
        .map_err(|err| {
            log::debug!("Rejected bearer token: {}", err);
            CredentialError::InvalidCredential
        })
}

/// Rejects requests without a valid bearer token before they reach a handler,
/// and stores the caller's `AuthenticatedUserId` in the request extensions.
#[derive(Clone)]
pub struct AuthMiddleware {
    tokens: web::Data<TokenService>,
}

impl AuthMiddleware {
    pub fn new(tokens: web::Data<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: web::Data<TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(req.headers().get(AUTHORIZATION), &self.tokens) {
            Ok(user_id) => {
                req.extensions_mut().insert(user_id);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                let response = AppError::from(err).error_response();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}
