//! Persistence seams.
//!
//! Services depend on these traits rather than on a pool, so the same business
//! logic runs against PostgreSQL in production and against the in-memory
//! implementations in tests. All reads skip soft-deleted rows.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, User};

pub use memory::{MemoryTaskRepository, MemoryUserRepository};
pub use postgres::{PgTaskRepository, PgUserRepository};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact, case-sensitive lookup. `Ok(None)` means no such user.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Inserts a user. Fails with `AppError::Conflict` if the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn insert(&self, task: NewTask) -> Result<Task, AppError>;

    /// Looks a task up by id and owner in one step, so another user's task is
    /// indistinguishable from a missing one.
    async fn find_owned(&self, id: i64, owner: i64) -> Result<Option<Task>, AppError>;

    /// Tasks owned by `owner`, in insertion order.
    async fn list_owned(&self, owner: i64) -> Result<Vec<Task>, AppError>;

    /// Persists title, description and status of `task`. The owner column is
    /// only used as a filter. Returns `None` if no live row matched.
    async fn update(&self, task: &Task) -> Result<Option<Task>, AppError>;

    /// Marks the task deleted. Returns false if no live row matched.
    async fn soft_delete(&self, id: i64, owner: i64) -> Result<bool, AppError>;
}
