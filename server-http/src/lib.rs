pub mod api;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod sweeper;
pub mod validation;

// Re-export key types
pub use routes::{build_app, build_router, App};
pub use state::AppState;
pub use sweeper::spawn_cache_sweeper;
