use async_trait::async_trait;
use sqlx::PgPool;

use super::{TaskRepository, UserRepository};
use crate::error::{is_unique_violation, AppError};
use crate::models::{NewTask, NewUser, Task, User};

const USER_COLUMNS: &str = "id, email, password_hash, created_at, updated_at, deleted_at";
const TASK_COLUMNS: &str =
    "id, title, description, status, user_id, created_at, updated_at, deleted_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("User already exists".into())
            } else {
                e.into()
            }
        })
    }
}

pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, task: NewTask) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description, status, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(task.title)
        .bind(task.description)
        .bind(task.status)
        .bind(task.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn find_owned(&self, id: i64, owner: i64) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list_owned(&self, owner: i64) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE user_id = $1 AND deleted_at IS NULL ORDER BY id",
            TASK_COLUMNS
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> Result<Option<Task>, AppError> {
        let updated = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks
             SET title = $1, description = $2, status = $3, updated_at = NOW()
             WHERE id = $4 AND user_id = $5 AND deleted_at IS NULL
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(task.id)
        .bind(task.user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn soft_delete(&self, id: i64, owner: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE tasks SET deleted_at = NOW()
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
