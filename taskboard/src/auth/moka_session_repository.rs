use super::error::AuthError;
use super::models::SessionUser;
use super::session::{generate_session_token, Session, SessionToken};
use super::session_store::SessionRepository;
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

/// Moka-based in-memory session repository
pub struct MokaSessionRepository {
    sessions: Cache<SessionToken, Session>,
}

impl MokaSessionRepository {
    /// Create a new repository with an optional capacity and an optional upper bound on session lifetime
    pub fn new(max_sessions: Option<u64>, max_ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder();

        if let Some(capacity) = max_sessions {
            builder = builder.max_capacity(capacity);
        }

        if let Some(ttl) = max_ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            sessions: builder.build(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(None, Some(Duration::from_secs(86_400)))
    }
}

#[async_trait]
impl SessionRepository for MokaSessionRepository {
    async fn create_session(&self, user: SessionUser, ttl_ms: u64) -> Result<Session, AuthError> {
        let token = generate_session_token();
        let session = Session::new(token.clone(), user, ttl_ms);

        self.sessions.insert(token, session.clone()).await;

        Ok(session)
    }

    async fn get_session(&self, token: &SessionToken) -> Result<SessionUser, AuthError> {
        let session = self
            .sessions
            .get(token)
            .await
            .ok_or(AuthError::SessionNotFound)?;

        // per-session TTL may be shorter than the cache-wide one
        if session.is_expired() {
            self.sessions.invalidate(token).await;
            return Err(AuthError::SessionNotFound);
        }

        Ok(session.user)
    }

    async fn delete_session(&self, token: &SessionToken) -> Result<bool, AuthError> {
        Ok(self.sessions.remove(token).await.is_some())
    }
}
