pub mod auth;
pub mod database;
pub mod health;
pub mod tasks;

pub use auth::{login, logout, signup};
pub use database::view_database;
pub use health::health_check;
pub use tasks::{create_task, delete_task, list_tasks, update_task};
