use std::sync::Arc;

use validator::Validate;

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskInput};
use crate::repository::TaskRepository;

const TASK_NOT_FOUND: &str = "Task not found";

fn not_found() -> AppError {
    AppError::NotFound(TASK_NOT_FOUND.into())
}

/// Task operations on behalf of an authenticated user.
///
/// Every operation is scoped to `owner`. A task that belongs to someone else is
/// reported exactly like a task that does not exist.
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    /// Validates `input` and stores it as a new task owned by `owner`.
    pub async fn create(&self, input: TaskInput, owner: i64) -> Result<Task, AppError> {
        input.validate()?;
        let task = self.tasks.insert(NewTask::new(input, owner)).await?;
        log::info!("User {} created task {}", owner, task.id);
        Ok(task)
    }

    pub async fn get_by_id(&self, id: i64, owner: i64) -> Result<Task, AppError> {
        self.tasks
            .find_owned(id, owner)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn list_mine(&self, owner: i64) -> Result<Vec<Task>, AppError> {
        self.tasks.list_owned(owner).await
    }

    /// Replaces title, description and status of one of `owner`'s tasks.
    pub async fn update(&self, id: i64, input: TaskInput, owner: i64) -> Result<Task, AppError> {
        input.validate()?;
        let mut task = self.get_by_id(id, owner).await?;
        task.apply(input);

        // The row can disappear between the lookup and the write.
        let task = self.tasks.update(&task).await?.ok_or_else(not_found)?;
        log::info!("User {} updated task {}", owner, task.id);
        Ok(task)
    }

    /// Soft-deletes one of `owner`'s tasks. Deleting twice is a `NotFound`.
    pub async fn delete(&self, id: i64, owner: i64) -> Result<(), AppError> {
        let task = self.get_by_id(id, owner).await?;
        if !self.tasks.soft_delete(task.id, owner).await? {
            return Err(not_found());
        }
        log::info!("User {} deleted task {}", owner, task.id);
        Ok(())
    }
}
