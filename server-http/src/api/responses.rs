use chrono::{DateTime, Utc};
use serde::Serialize;
use taskboard::auth::SessionUser;
use taskboard::domain::{ApiLog, Task, TaskId, TaskStatus, User, UserId};
use taskboard::TaskListing;

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// === Auth Models ===

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub email: String,
}

impl From<SessionUser> for UserSummary {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

// === Task Models ===

/// A task as seen by its owner
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            status: task.status,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskEnvelope {
    pub task: TaskResponse,
}

impl From<&Task> for TaskEnvelope {
    fn from(task: &Task) -> Self {
        Self { task: task.into() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksResponse {
    pub tasks: Vec<TaskResponse>,
    pub from_cache: bool,
}

impl From<TaskListing> for ListTasksResponse {
    fn from(listing: TaskListing) -> Self {
        Self {
            tasks: listing.tasks.iter().map(TaskResponse::from).collect(),
            from_cache: listing.from_cache,
        }
    }
}

// === Database View Models ===

#[derive(Debug, Serialize)]
pub struct UserRecordResponse {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserRecordResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub total_tasks: usize,
    pub total_users: usize,
    pub total_logs: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseViewResponse {
    pub tasks: Vec<Task>,
    pub users: Vec<UserRecordResponse>,
    pub recent_logs: Vec<ApiLog>,
    pub stats: DatabaseStats,
}
