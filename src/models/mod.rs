pub mod task;
pub mod user;

pub use task::{NewTask, Task, TaskInput, DEFAULT_STATUS};
pub use user::{NewUser, User};
