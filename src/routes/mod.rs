pub mod auth;
pub mod health;
pub mod profile;
pub mod tasks;

use actix_web::web;

use crate::{auth::AuthMiddleware, error::AppError, state::AppState};

/// Registers every route and the shared services.
///
/// `/register`, `/login` and `/health` are public; `/profile` and everything
/// under `/tasks` sit behind `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig, state: &AppState) {
    let gate = AuthMiddleware::new(state.tokens.clone());

    cfg.app_data(state.credentials.clone())
        .app_data(state.tasks.clone())
        .app_data(state.tokens.clone())
        .app_data(json_config())
        .app_data(path_config())
        .service(health::health)
        .service(auth::register)
        .service(auth::login)
        .service(
            web::resource("/profile")
                .wrap(gate.clone())
                .route(web::get().to(profile::profile)),
        )
        .service(
            web::scope("/tasks")
                .wrap(gate)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}

/// Unparseable or incomplete JSON bodies become a 400 with the usual error shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected request body: {}", err);
        AppError::BadRequest("Invalid request data".into()).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected path parameter: {}", err);
        AppError::BadRequest("Invalid task ID".into()).into()
    })
}
