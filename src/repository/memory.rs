//! In-process repositories backed by a `Mutex<Vec<_>>`.
//!
//! They follow the same contract as the PostgreSQL ones: unique emails,
//! generated ids, timestamps and soft deletes.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

use super::{TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, User};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::InternalServerError("In-memory store lock poisoned".into()))
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = lock(&self.users)?;
        Ok(users
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = lock(&self.users)?;
        // The unique index covers soft-deleted rows too.
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let now = Utc::now();
        let created = User {
            id: users.len() as i64 + 1,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        users.push(created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct MemoryTaskRepository {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskRepository {
    async fn insert(&self, task: NewTask) -> Result<Task, AppError> {
        let mut tasks = lock(&self.tasks)?;
        let now = Utc::now();
        let created = Task {
            id: tasks.len() as i64 + 1,
            title: task.title,
            description: task.description,
            status: task.status,
            user_id: task.user_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tasks.push(created.clone());
        Ok(created)
    }

    async fn find_owned(&self, id: i64, owner: i64) -> Result<Option<Task>, AppError> {
        let tasks = lock(&self.tasks)?;
        Ok(tasks
            .iter()
            .find(|t| t.id == id && t.user_id == owner && t.deleted_at.is_none())
            .cloned())
    }

    async fn list_owned(&self, owner: i64) -> Result<Vec<Task>, AppError> {
        let tasks = lock(&self.tasks)?;
        Ok(tasks
            .iter()
            .filter(|t| t.user_id == owner && t.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn update(&self, task: &Task) -> Result<Option<Task>, AppError> {
        let mut tasks = lock(&self.tasks)?;
        let stored = tasks
            .iter_mut()
            .find(|t| t.id == task.id && t.user_id == task.user_id && t.deleted_at.is_none());

        Ok(stored.map(|stored| {
            stored.title = task.title.clone();
            stored.description = task.description.clone();
            stored.status = task.status.clone();
            stored.updated_at = Utc::now();
            stored.clone()
        }))
    }

    async fn soft_delete(&self, id: i64, owner: i64) -> Result<bool, AppError> {
        let mut tasks = lock(&self.tasks)?;
        match tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner && t.deleted_at.is_none())
        {
            Some(task) => {
                task.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
