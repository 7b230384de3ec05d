//! Connection pool and schema migrations.
//!
//! Migrations live in `migrations/` and are embedded into the binary at compile
//! time; `run_migrations` must succeed before the server accepts traffic.

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
}

/// Creates the `users` and `tasks` tables if they don't exist yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    log::info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations completed");
    Ok(())
}
