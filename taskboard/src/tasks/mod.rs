pub mod service;

pub use service::{TaskList, TaskListing, TaskService, UserTaskCache};
