use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::auth::AuthenticatedUserId;

/// Greets the authenticated user. Useful to check a token end to end.
pub async fn profile(user: AuthenticatedUserId) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Welcome!",
        "userID": user.0
    }))
}
