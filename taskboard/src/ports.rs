#![deny(clippy::all)]

use crate::domain::{ApiLog, NewApiLog, NewTask, Task, TaskId, TaskPatch, User, UserId};
use async_trait::async_trait;
use shared::Result;

// Ports are the pluggable extension points for the authoritative stores

/// Port for the authoritative task store (e.g., the JSON file store)
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// All tasks owned by `user_id`, newest first
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Task>>;
    /// Every task of every user, newest first
    async fn list_all(&self) -> Result<Vec<Task>>;
    async fn find(&self, user_id: UserId, task_id: TaskId) -> Result<Option<Task>>;
    async fn insert(&self, user_id: UserId, task: NewTask) -> Result<Task>;
    /// Returns `None` when no task `task_id` belongs to `user_id`
    async fn update(&self, user_id: UserId, task_id: TaskId, patch: TaskPatch) -> Result<Option<Task>>;
    /// Returns whether a task was removed
    async fn delete(&self, user_id: UserId, task_id: TaskId) -> Result<bool>;
}

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;
    async fn list_all(&self) -> Result<Vec<User>>;
}

/// Port for persisting the per-request API log
#[async_trait]
pub trait ApiLogRepository: Send + Sync + 'static {
    async fn append(&self, entry: NewApiLog) -> Result<ApiLog>;
    /// The `limit` most recent entries, newest first
    async fn recent(&self, limit: usize) -> Result<Vec<ApiLog>>;
}
