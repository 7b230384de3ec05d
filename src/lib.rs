#![doc = "The `taskgate` library crate."]
#![doc = ""]
#![doc = "A task-management API: users register and log in with email and password,"]
#![doc = "receive a bearer token, and manage tasks that only they can see or change."]
#![doc = "The binary (`main.rs`) loads `Config`, prepares the database, builds an"]
#![doc = "`AppState` and serves `routes::config`."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::state::AppState;
