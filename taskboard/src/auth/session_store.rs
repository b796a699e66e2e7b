use super::error::AuthError;
use super::models::SessionUser;
use super::session::{Session, SessionToken};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for session storage operations
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a new session for the given user with specified TTL
    async fn create_session(&self, user: SessionUser, ttl_ms: u64) -> Result<Session, AuthError>;

    /// Get the user behind a live session token
    async fn get_session(&self, token: &SessionToken) -> Result<SessionUser, AuthError>;

    /// Delete a session (logout)
    async fn delete_session(&self, token: &SessionToken) -> Result<bool, AuthError>;
}

/// Session store service
pub struct SessionStore<S: SessionRepository> {
    repository: Arc<S>,
    ttl_ms: u64,
}

impl<S: SessionRepository> SessionStore<S> {
    pub fn new(repository: Arc<S>, ttl_ms: u64) -> Self {
        Self { repository, ttl_ms }
    }

    pub async fn create_session(&self, user: SessionUser) -> Result<Session, AuthError> {
        self.repository.create_session(user, self.ttl_ms).await
    }

    /// Validate a session token and return the associated user
    pub async fn validate_session(&self, token: &SessionToken) -> Result<SessionUser, AuthError> {
        self.repository.get_session(token).await
    }

    /// Invalidate a session (logout)
    pub async fn invalidate_session(&self, token: &SessionToken) -> Result<bool, AuthError> {
        self.repository.delete_session(token).await
    }
}
