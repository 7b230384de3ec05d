use actix_web::web;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::Config;
use crate::repository::{
    MemoryTaskRepository, MemoryUserRepository, PgTaskRepository, PgUserRepository,
    TaskRepository, UserRepository,
};
use crate::services::{CredentialStore, TaskService};

/// The services shared by all workers, built once from `Config`.
#[derive(Clone)]
pub struct AppState {
    pub credentials: web::Data<CredentialStore>,
    pub tasks: web::Data<TaskService>,
    pub tokens: web::Data<TokenService>,
}

impl AppState {
    pub fn new(
        config: &Config,
        users: Arc<dyn UserRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        Self {
            credentials: web::Data::new(CredentialStore::from_config(users, config)),
            tasks: web::Data::new(TaskService::new(tasks)),
            tokens: web::Data::new(TokenService::from_config(config)),
        }
    }

    pub fn postgres(pool: PgPool, config: &Config) -> Self {
        Self::new(
            config,
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTaskRepository::new(pool)),
        )
    }

    /// State backed by in-memory repositories; nothing survives a restart.
    pub fn in_memory(config: &Config) -> Self {
        Self::new(
            config,
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryTaskRepository::new()),
        )
    }
}
