//! Process configuration.
//!
//! `Config` is read once at startup and handed to the components that need it
//! (token service, credential store, database pool). Nothing else in the crate
//! reads environment variables.

use std::env;
use std::fmt;

/// Secret used to sign tokens when `JWT_SECRET` is not set. Only suitable for local runs.
pub const FALLBACK_JWT_SECRET: &str = "default_secret";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable required to reach the database is not set.
    Missing(&'static str),
    /// A variable is set but its value can't be used.
    Invalid { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} must be set", name),
            ConfigError::Invalid { name, value } => {
                write!(f, "{} has an invalid value: {:?}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&lookup)?,
        };

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                log::warn!("JWT_SECRET is not set, falling back to the built-in development secret");
                FALLBACK_JWT_SECRET.to_string()
            }
        };

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            database_url,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret,
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

/// Assembles a connection string from `DB_*` variables. With `APP_ENV=test`
/// the database name comes from `TEST_DB_NAME` instead of `DB_NAME`.
fn database_url_from_parts<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

    let user = required("DB_USER")?;
    let password = required("DB_PASSWORD")?;
    let host = required("DB_HOST")?;
    let port: u16 = parse_or(lookup, "DB_PORT", 5432)?;
    let name = if lookup("APP_ENV").as_deref() == Some("test") {
        required("TEST_DB_NAME")?
    } else {
        required("DB_NAME")?
    };

    Ok(format!(
        "postgresql://{}:{}@{}:{}/{}",
        user, password, host, port, name
    ))
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
