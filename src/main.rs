use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use std::io;

use taskgate::{db, routes, AppState, Config};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    log::error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;

    let pool = db::connect(&config)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;
    db::run_migrations(&pool)
        .await
        .map_err(|e| startup_error("Migration failed", e))?;

    let state = AppState::postgres(pool, &config);

    log::info!("Starting taskgate server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| routes::config(cfg, &state))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
