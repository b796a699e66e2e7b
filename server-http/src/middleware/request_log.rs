use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::time::Instant;
use taskboard::auth::SessionUser;
use taskboard::domain::NewApiLog;
use tracing::{error, info};

/// Records every API call: one tracing event plus one persisted `ApiLog`.
///
/// A failure to persist the log entry never changes the response.
pub async fn request_log_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let response_time_ms = started.elapsed().as_millis() as u64;
    let status_code = response.status().as_u16();
    let user_id = response.extensions().get::<SessionUser>().map(|u| u.id);

    info!(
        "{} {} - User: {} - Status: {} - {}ms",
        method,
        path,
        user_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "anonymous".to_string()),
        status_code,
        response_time_ms
    );

    let entry = NewApiLog {
        method,
        path,
        timestamp: Utc::now(),
        user_id,
        status_code: Some(status_code),
        response_time_ms: Some(response_time_ms),
    };

    if let Err(e) = state.api_logs.append(entry).await {
        error!("Failed to record API log: {}", e);
    }

    response
}
