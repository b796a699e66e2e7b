// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("already exists: {0}")]
    Conflict(String),
    #[error("task not found: {0}")]
    TaskNotFound(u64),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
