use crate::domain::UserId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account exists but the password did not match
    #[error("Invalid credentials")]
    WrongPassword(UserId),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Password must be at least 6 characters")]
    WeakPassword,

    #[error("Session not found or expired")]
    SessionNotFound,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Password hashing error: {0}")]
    PasswordHashError(String),
}

impl From<shared::Error> for AuthError {
    fn from(err: shared::Error) -> Self {
        match err {
            shared::Error::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::StorageError(other.to_string()),
        }
    }
}
