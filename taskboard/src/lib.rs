//! Core of the task board: the per-user task-list cache, domain records,
//! store ports and the services the HTTP layer calls into.

pub mod auth;
pub mod cache;
pub mod domain;
pub mod ports;
pub mod tasks;

pub use cache::{TaskListCache, TASK_LIST_TTL};
pub use tasks::{TaskListing, TaskService, UserTaskCache};
