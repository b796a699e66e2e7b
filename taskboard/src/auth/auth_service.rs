use super::error::AuthError;
use super::password::{hash_password, verify_password};
use crate::domain::User;
use crate::ports::UserRepository;
use std::sync::Arc;
use tracing::info;

pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Register a new account
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password)?;
        let user = self.user_repo.create(email, &password_hash).await?;

        info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Authenticate a user by email and password
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::WrongPassword(user.id));
        }

        Ok(user)
    }
}
