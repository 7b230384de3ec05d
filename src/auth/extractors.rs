use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// The authenticated caller's user id.
///
/// `AuthMiddleware` inserts this into the request extensions after verifying the
/// bearer token; handlers on protected routes take it as an argument. Outside a
/// protected route the extraction fails with `AppError::Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub i64);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUserId>().copied() {
            Some(user_id) => ready(Ok(user_id)),
            None => {
                log::error!(
                    "No authenticated user on {}; is AuthMiddleware applied to this route?",
                    req.path()
                );
                let err = AppError::Unauthorized("Unauthorized".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
