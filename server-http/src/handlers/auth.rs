use crate::api::{AuthResponse, CredentialsRequest, MessageResponse};
use crate::error::ApiError;
use crate::middleware::extract_bearer_token;
use crate::state::AppState;
use crate::validation;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use taskboard::auth::{AuthError, SessionUser};
use tracing::info;

/// POST /api/auth/signup
///
/// Creates an account and immediately opens a session for it.
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Extension<SessionUser>, Json<AuthResponse>), ApiError> {
    let (email, password) = validation::credentials(validation::body_or_default(body))?;

    let user = state.auth_service.signup(&email, &password).await?;
    let session_user = SessionUser::from(&user);
    let session = state.session_store.create_session(session_user.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Extension(session_user.clone()),
        Json(AuthResponse {
            token: session.token,
            user: session_user.into(),
        }),
    ))
}

/// POST /api/auth/login
///
/// Verifies the password with Argon2 and returns a bearer token. A wrong
/// password for a known account still reports that account to the request log.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(Extension<SessionUser>, Json<AuthResponse>), Response> {
    let (email, password) = validation::credentials(validation::body_or_default(body))
        .map_err(|e| ApiError::from(e).into_response())?;

    let user = match state.auth_service.authenticate(&email, &password).await {
        Ok(user) => user,
        Err(AuthError::WrongPassword(id)) => {
            let attempted = SessionUser { id, email };
            return Err((
                Extension(attempted),
                ApiError::from(AuthError::InvalidCredentials),
            )
                .into_response());
        }
        Err(e) => return Err(ApiError::from(e).into_response()),
    };

    let session_user = SessionUser::from(&user);
    let session = state
        .session_store
        .create_session(session_user.clone())
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    info!("User {} logged in", user.id);

    Ok((
        Extension(session_user.clone()),
        Json(AuthResponse {
            token: session.token,
            user: session_user.into(),
        }),
    ))
}

/// POST /api/auth/logout
///
/// Invalidates the bearer token the request was authenticated with.
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or_else(ApiError::unauthorized)?;

    state.session_store.invalidate_session(&token).await?;
    info!("User {} logged out", user.id);

    Ok(Json(MessageResponse::new("Logged out")))
}
