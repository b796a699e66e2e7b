pub mod authentication;
pub mod request_log;

pub use authentication::{auth_middleware, extract_bearer_token};
pub use request_log::request_log_middleware;
