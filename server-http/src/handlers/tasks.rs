use crate::api::{CreateTaskRequest, ListTasksResponse, MessageResponse, TaskEnvelope, UpdateTaskRequest};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use taskboard::auth::SessionUser;
use taskboard::domain::TaskId;
use tracing::info;

/// GET /api/tasks
///
/// Served from the task-list cache when possible; `fromCache` says which.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<ListTasksResponse>, ApiError> {
    let listing = state.task_service.list_tasks(user.id).await?;
    Ok(Json(listing.into()))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskEnvelope>), ApiError> {
    let new_task = validation::new_task(validation::body_or_default(body))?;
    let task = state.task_service.create_task(user.id, new_task).await?;

    info!("CREATE: user={}, task={}", user.id, task.id);
    Ok((StatusCode::CREATED, Json(TaskEnvelope::from(&task))))
}

/// PATCH /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    task_id: Result<Path<TaskId>, PathRejection>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskEnvelope>, ApiError> {
    let task_id = parse_task_id(task_id)?;
    let patch = validation::task_patch(validation::body_or_default(body));
    let task = state.task_service.update_task(user.id, task_id, patch).await?;

    info!("UPDATE: user={}, task={}, status={}", user.id, task.id, task.status);
    Ok(Json(TaskEnvelope::from(&task)))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    task_id: Result<Path<TaskId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let task_id = parse_task_id(task_id)?;
    state.task_service.delete_task(user.id, task_id).await?;

    info!("DELETE: user={}, task={}", user.id, task_id);
    Ok(Json(MessageResponse::new("Task deleted")))
}

/// An id that is not a valid task id can never name one of the caller's tasks
fn parse_task_id(path: Result<Path<TaskId>, PathRejection>) -> Result<TaskId, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::task_not_found())
}
