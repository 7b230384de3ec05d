#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, App};
use serde_json::{json, Value};
use taskgate::{routes, AppState, Config};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "Passw0rd!";

/// Configuration for in-memory test apps. Cost 4 keeps bcrypt fast.
pub fn test_config() -> Config {
    Config::from_vars(|name| match name {
        "DATABASE_URL" => Some("postgres://unused".to_string()),
        "JWT_SECRET" => Some(JWT_SECRET.to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

pub async fn init_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| routes::config(cfg, &state)),
    )
    .await
}

pub async fn init_memory_app(
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    init_app(AppState::in_memory(&test_config())).await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Sends a request and returns the status with the body parsed as JSON
/// (`Value::Null` for empty bodies).
pub async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    req: test::TestRequest,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!("non-JSON body: {:?}", String::from_utf8_lossy(&body))
        })
    };
    (status, json)
}

pub async fn register(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "email": email, "password": password })),
    )
    .await
}

pub async fn login(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": email, "password": password })),
    )
    .await
}

/// Registers `email` with the default password and returns a fresh token.
pub async fn register_and_login(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
) -> String {
    let (status, body) = register(app, email, PASSWORD).await;
    assert_eq!(status, StatusCode::CREATED, "register {}: {}", email, body);

    let (status, body) = login(app, email, PASSWORD).await;
    assert_eq!(status, StatusCode::OK, "login {}: {}", email, body);
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

/// The user id behind `token`, as reported by `/profile`.
pub async fn user_id(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    token: &str,
) -> i64 {
    let (status, body) = send(
        app,
        test::TestRequest::get().uri("/profile").insert_header(bearer(token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "profile: {}", body);
    body["userID"].as_i64().expect("profile carries userID")
}
