mod common;

use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{test, App, HttpServer};
use chrono::Duration;
use common::{bearer, init_memory_app, register_and_login, send, test_config, user_id};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::net::TcpListener;
use taskgate::auth::TokenService;
use taskgate::{routes, AppState};

#[test_log::test(actix_rt::test)]
async fn test_create_task_ignores_client_owner_and_defaults_status() {
    let app = init_memory_app().await;
    let token = register_and_login(&app, "a@x.com").await;
    let owner = user_id(&app, &token).await;

    let (status, task) = send(
        &app,
        test::TestRequest::post()
            .uri("/tasks")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "T", "user_id": 999 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["title"], "T");
    assert_eq!(task["status"], "Pending");
    assert_eq!(task["user_id"], json!(owner));
    assert!(task["id"].is_i64());
    assert!(task["created_at"].is_string());
    assert!(task["updated_at"].is_string());
    assert!(task.get("deleted_at").is_none());
}

#[test_log::test(actix_rt::test)]
async fn test_long_title_and_description_are_accepted() {
    let app = init_memory_app().await;
    let token = register_and_login(&app, "a@x.com").await;
    let title = "a".repeat(201);
    let description = "d".repeat(1001);

    let (status, task) = send(
        &app,
        test::TestRequest::post()
            .uri("/tasks")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": title, "description": description })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["title"], json!(title));
    assert_eq!(task["description"], json!(description));
}

#[test_log::test(actix_rt::test)]
async fn test_task_lifecycle() {
    let app = init_memory_app().await;
    let token = register_and_login(&app, "a@x.com").await;

    let (status, created) = send(
        &app,
        test::TestRequest::post()
            .uri("/tasks")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "Write report", "description": "Q3 numbers" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("task id");
    let uri = format!("/tasks/{}", id);

    let (status, fetched) = send(
        &app,
        test::TestRequest::get().uri(&uri).insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, list) = send(
        &app,
        test::TestRequest::get().uri("/tasks").insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([created]));

    let (status, updated) = send(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "Write final report", "status": "Completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["title"], "Write final report");
    assert_eq!(updated["status"], "Completed");
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["user_id"], created["user_id"]);
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, body) = send(
        &app,
        test::TestRequest::delete().uri(&uri).insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri(&uri).insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Task not found" }));

    let (status, _) = send(
        &app,
        test::TestRequest::delete().uri(&uri).insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, list) = send(
        &app,
        test::TestRequest::get().uri("/tasks").insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[test_log::test(actix_rt::test)]
async fn test_other_users_tasks_are_invisible() {
    let app = init_memory_app().await;
    let alice = register_and_login(&app, "alice@x.com").await;
    let bob = register_and_login(&app, "bob@x.com").await;

    let (_, task) = send(
        &app,
        test::TestRequest::post()
            .uri("/tasks")
            .insert_header(bearer(&alice))
            .set_json(json!({ "title": "Alice's task" })),
    )
    .await;
    let uri = format!("/tasks/{}", task["id"]);

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri(&uri).insert_header(bearer(&bob)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Task not found" }));

    let (status, _) = send(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&bob))
            .set_json(json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        test::TestRequest::delete().uri(&uri).insert_header(bearer(&bob)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, list) = send(
        &app,
        test::TestRequest::get().uri("/tasks").insert_header(bearer(&bob)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    // Alice's task came through untouched.
    let (status, still_there) = send(
        &app,
        test::TestRequest::get().uri(&uri).insert_header(bearer(&alice)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(still_there, task);
}

#[test_log::test(actix_rt::test)]
async fn test_invalid_task_input_is_bad_request() {
    let app = init_memory_app().await;
    let token = register_and_login(&app, "a@x.com").await;

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/tasks")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/tasks")
            .insert_header(bearer(&token))
            .set_json(json!({ "description": "no title" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/tasks/abc")
            .insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid task ID" }));

    let (status, _) = send(
        &app,
        test::TestRequest::put()
            .uri("/tasks/1")
            .insert_header(bearer(&token))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("not json"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test_log::test(actix_rt::test)]
async fn test_task_routes_reject_bad_credentials() {
    let config = test_config();
    let app = common::init_app(AppState::in_memory(&config)).await;
    let token = register_and_login(&app, "a@x.com").await;
    let owner = user_id(&app, &token).await;

    let expired = TokenService::new(common::JWT_SECRET)
        .with_ttl(Duration::seconds(-60))
        .issue(owner)
        .expect("token issued");
    let forged = TokenService::new("some-other-secret")
        .issue(owner)
        .expect("token issued");

    let cases = vec![
        (None, "Authorization header missing"),
        (Some(token.clone()), "Invalid Authorization header format"),
        (Some(format!("Token {}", token)), "Invalid Authorization header format"),
        (Some(format!("Bearer {}", expired)), "Invalid or expired token"),
        (Some(format!("Bearer {}", forged)), "Invalid or expired token"),
        (Some(format!("Bearer {}x", token)), "Invalid or expired token"),
    ];

    for (header, message) in cases {
        let mut req = test::TestRequest::post()
            .uri("/tasks")
            .set_json(json!({ "title": "T" }));
        if let Some(value) = &header {
            req = req.insert_header(("Authorization", value.as_str()));
        }

        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header: {:?}", header);
        assert_eq!(body, json!({ "error": message }), "header: {:?}", header);
    }

    // Nothing was created by the rejected requests.
    let (_, list) = send(
        &app,
        test::TestRequest::get().uri("/tasks").insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(list, json!([]));
}

#[test_log::test(actix_rt::test)]
async fn test_unauthorized_create_over_http() {
    let state = AppState::in_memory(&test_config());

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind to a free port");
    let addr = listener.local_addr().expect("local address");

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| routes::config(cfg, &state))
    })
    .workers(1)
    .listen(listener)
    .expect("listen on bound socket")
    .run();
    let handle = server.handle();
    let server_task = actix_rt::spawn(server);

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://{}/tasks", addr))
        .json(&json!({ "title": "T" }))
        .send()
        .await
        .expect("request sent");

    assert_eq!(resp.status().as_u16(), 401);
    let body: Value = resp.json().await.expect("JSON body");
    assert_eq!(body, json!({ "error": "Authorization header missing" }));

    handle.stop(false).await;
    server_task.abort();
}
