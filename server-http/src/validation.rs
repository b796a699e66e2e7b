use crate::api::{CreateTaskRequest, CredentialsRequest, UpdateTaskRequest};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use taskboard::domain::{NewTask, TaskPatch, TaskStatus};
use tracing::debug;

#[derive(Debug, PartialEq)]
pub enum ValidationError {
    MissingCredentials,
    MissingTitle,
    InvalidStatus(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingCredentials => write!(f, "Email and password are required"),
            ValidationError::MissingTitle => write!(f, "Title is required"),
            ValidationError::InvalidStatus(_) => write!(f, "Invalid status"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A missing or undecodable body reads as a request with no fields set, so
/// the field checks below report it with their usual message.
pub fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            debug!("Unreadable request body: {}", rejection.body_text());
            T::default()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Email and password, both required and non-empty
pub fn credentials(req: CredentialsRequest) -> Result<(String, String), ValidationError> {
    match (non_empty(req.email), non_empty(req.password)) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(ValidationError::MissingCredentials),
    }
}

/// A trimmed, non-blank title and a known status (default `TODO`)
pub fn new_task(req: CreateTaskRequest) -> Result<NewTask, ValidationError> {
    let title = req
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ValidationError::MissingTitle)?;

    let status = match req.status {
        Some(raw) => raw
            .parse::<TaskStatus>()
            .map_err(|_| ValidationError::InvalidStatus(raw))?,
        None => TaskStatus::default(),
    };

    Ok(NewTask::new(title, status))
}

/// Keeps only the usable fields of an update; unknown statuses and blank
/// titles are dropped rather than rejected.
pub fn task_patch(req: UpdateTaskRequest) -> TaskPatch {
    TaskPatch {
        title: req
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
        status: req.status.and_then(|s| s.parse::<TaskStatus>().ok()),
    }
}
