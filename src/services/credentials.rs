use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::INVALID_LOGIN_MESSAGE;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

/// Stores user accounts and checks passwords.
///
/// Plaintext passwords only pass through this type on their way into bcrypt;
/// they are never stored or logged.
pub struct CredentialStore {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
    /// Checked against for unknown emails; every failed login runs bcrypt once.
    dummy_hash: OnceCell<String>,
}

/// Plaintext behind `dummy_hash`; never matches a real login.
const DUMMY_PASSWORD: &str = "taskgate-no-such-user";

impl CredentialStore {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            bcrypt_cost,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn from_config(users: Arc<dyn UserRepository>, config: &Config) -> Self {
        Self::new(users, config.bcrypt_cost)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.users.find_by_email(email).await
    }

    /// Hashes `password` and stores a new user.
    ///
    /// Fails with `AppError::Conflict` if the email is already registered, including
    /// when a concurrent registration wins the race at the database.
    pub async fn create(&self, email: &str, password: &str) -> Result<User, AppError> {
        let password_hash = self.hash(password).await?;

        let user = self
            .users
            .insert(NewUser {
                email: email.to_owned(),
                password_hash,
            })
            .await?;

        log::info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Returns the user if `password` matches the one stored for `email`.
    ///
    /// An unknown email and a wrong password produce the same error.
    pub async fn verify_login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let invalid = || AppError::Unauthorized(INVALID_LOGIN_MESSAGE.into());

        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                let dummy = self
                    .dummy_hash
                    .get_or_try_init(|| self.hash(DUMMY_PASSWORD))
                    .await?;
                self.check(password, dummy.clone()).await?;
                log::warn!("Login attempt for unknown email");
                return Err(invalid());
            }
        };

        if self.check(password, user.password_hash.clone()).await? {
            Ok(user)
        } else {
            log::warn!("Failed login for user {}", user.id);
            Err(invalid())
        }
    }

    async fn hash(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Hashing task failed: {}", e)))?
    }

    async fn check(&self, password: &str, hash: String) -> Result<bool, AppError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Hashing task failed: {}", e)))?
    }
}
