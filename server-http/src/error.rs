use crate::api::ErrorResponse;
use crate::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use taskboard::auth::AuthError;
use tracing::error;

/// Error returned by handlers and middleware, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Internal,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }

    pub fn task_not_found() -> Self {
        ApiError::NotFound("Task not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::Unauthorized(msg) | ApiError::NotFound(msg) => msg,
            ApiError::Internal => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.message()))).into_response()
    }
}

impl From<shared::Error> for ApiError {
    fn from(err: shared::Error) -> Self {
        match err {
            shared::Error::Conflict(_) => ApiError::BadRequest(err.to_string()),
            shared::Error::TaskNotFound(_) => ApiError::task_not_found(),
            shared::Error::Validation(msg) => ApiError::BadRequest(msg),
            shared::Error::Storage(_) | shared::Error::Internal(_) => {
                error!("Request failed: {}", err);
                ApiError::Internal
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::WrongPassword(_) => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::SessionNotFound => ApiError::unauthorized(),
            AuthError::UserAlreadyExists | AuthError::WeakPassword => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::StorageError(_) | AuthError::PasswordHashError(_) => {
                error!("Auth failure: {}", err);
                ApiError::Internal
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_status() {
        assert_eq!(ApiError::from(shared::Error::TaskNotFound(3)).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(shared::Error::Validation("No valid fields to update".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(shared::Error::Conflict("user ada@example.com".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(shared::Error::Storage("disk full".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_errors_map_to_status() {
        assert_eq!(ApiError::from(AuthError::InvalidCredentials).status(), StatusCode::UNAUTHORIZED);
        let wrong_password = ApiError::from(AuthError::WrongPassword(7));
        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.message(), "Invalid credentials");
        assert_eq!(ApiError::from(AuthError::UserAlreadyExists).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(AuthError::PasswordHashError("bad".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_hides_details() {
        let err = ApiError::from(shared::Error::Storage("/var/db: permission denied".into()));
        assert_eq!(err.message(), "Internal server error");
    }
}
