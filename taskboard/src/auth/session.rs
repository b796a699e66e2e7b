use super::models::SessionUser;
use std::time::{SystemTime, UNIX_EPOCH};

/// Session token type - a secure random string
pub type SessionToken = String;

/// Get current timestamp in milliseconds since Unix epoch
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub user: SessionUser,
    pub created_at: u64, // ms since epoch
    pub expires_at: u64, // ms since epoch
}

impl Session {
    pub fn new(token: SessionToken, user: SessionUser, ttl_ms: u64) -> Self {
        let now = current_timestamp_ms();

        Self {
            token,
            user,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
        }
    }

    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

/// Generate a cryptographically secure random session token
pub fn generate_session_token() -> SessionToken {
    use rand::Rng;

    // 32 random bytes as hex (64 characters)
    let mut rng = rand::rng();
    (0..32)
        .map(|_| format!("{:02x}", rng.random::<u8>()))
        .collect()
}
