use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Status given to a task when the client does not provide one.
pub const DEFAULT_STATUS: &str = "Pending";
/// Other statuses clients commonly use. The set is open, any string is accepted.
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_COMPLETED: &str = "Completed";

/// Input structure for creating or updating a task.
///
/// Any `user_id` sent by the client is ignored: the field does not exist here,
/// and the owner always comes from the authenticated identity.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. The only required field: a missing title
    /// deserializes as empty and is rejected by validation.
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// An optional description for the task.
    pub description: Option<String>,

    /// The status of the task. Unset or empty means `"Pending"`; anything else
    /// is stored as sent.
    pub status: Option<String>,
}

impl TaskInput {
    /// The status to store for this input.
    pub fn normalized_status(&self) -> String {
        match self.status.as_deref() {
            Some(status) if !status.is_empty() => status.to_string(),
            _ => DEFAULT_STATUS.to_string(),
        }
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    /// Identifier of the user who owns the task.
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the task is soft-deleted. Never serialized.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Overwrites the mutable fields from `input`. The owner is never touched.
    pub fn apply(&mut self, input: TaskInput) {
        self.status = input.normalized_status();
        self.title = input.title;
        self.description = input.description;
    }
}

/// A task ready to be inserted; the store assigns the id and timestamps.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub user_id: i64,
}

impl NewTask {
    /// Builds the insert for `owner`, applying the default status.
    pub fn new(input: TaskInput, owner: i64) -> Self {
        Self {
            status: input.normalized_status(),
            title: input.title,
            description: input.description,
            user_id: owner,
        }
    }
}
