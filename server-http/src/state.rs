use std::sync::Arc;
use std::time::Duration;
use storage_engine::JsonFileStore;
use taskboard::auth::{AuthService, MokaSessionRepository, SessionStore};
use taskboard::ports::{ApiLogRepository, TaskStore, UserRepository};
use taskboard::{TaskService, UserTaskCache};

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<TaskService>,
    pub auth_service: Arc<AuthService>,
    pub session_store: Arc<SessionStore<MokaSessionRepository>>,
    pub tasks: Arc<dyn TaskStore>,
    pub users: Arc<dyn UserRepository>,
    pub api_logs: Arc<dyn ApiLogRepository>,
}

impl AppState {
    /// Wire every service onto one store. The task-list cache is created here,
    /// once, and shared by all handlers for the life of the process.
    pub fn new(store: Arc<JsonFileStore>, session_ttl: Duration) -> Self {
        let tasks: Arc<dyn TaskStore> = store.clone();
        let users: Arc<dyn UserRepository> = store.clone();
        let api_logs: Arc<dyn ApiLogRepository> = store;

        let task_cache = Arc::new(UserTaskCache::new());
        let task_service = Arc::new(TaskService::new(tasks.clone(), task_cache));

        let auth_service = Arc::new(AuthService::new(users.clone()));

        let session_repository = Arc::new(MokaSessionRepository::new(None, Some(session_ttl)));
        let session_store = Arc::new(SessionStore::new(
            session_repository,
            session_ttl.as_millis() as u64,
        ));

        Self {
            task_service,
            auth_service,
            session_store,
            tasks,
            users,
            api_logs,
        }
    }
}
