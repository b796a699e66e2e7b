// Public API
pub mod auth_service;
pub mod error;
pub mod models;
pub mod moka_session_repository;
pub mod password;
pub mod session;
pub mod session_store;

// Re-export commonly used types
pub use auth_service::AuthService;
pub use error::AuthError;
pub use models::SessionUser;
pub use moka_session_repository::MokaSessionRepository;
pub use session::{generate_session_token, Session, SessionToken};
pub use session_store::{SessionRepository, SessionStore};
