//! Storage adapters implementing the task board's store ports.

mod json_store;

pub use json_store::JsonFileStore;
