use crate::api::{DatabaseStats, DatabaseViewResponse, UserRecordResponse};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};

const RECENT_LOG_LIMIT: usize = 50;

/// GET /api/view-db
///
/// Debug view of the whole store. Password hashes are never included.
pub async fn view_database(
    State(state): State<AppState>,
) -> Result<Json<DatabaseViewResponse>, ApiError> {
    let tasks = state.tasks.list_all().await?;
    let users: Vec<UserRecordResponse> = state
        .users
        .list_all()
        .await?
        .into_iter()
        .map(UserRecordResponse::from)
        .collect();
    let recent_logs = state.api_logs.recent(RECENT_LOG_LIMIT).await?;

    let stats = DatabaseStats {
        total_tasks: tasks.len(),
        total_users: users.len(),
        total_logs: recent_logs.len(),
    };

    Ok(Json(DatabaseViewResponse {
        tasks,
        users,
        recent_logs,
        stats,
    }))
}
