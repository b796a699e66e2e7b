use crate::cache::TaskListCache;
use crate::domain::{NewTask, Task, TaskId, TaskPatch, UserId};
use crate::ports::TaskStore;
use shared::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Cached task list handed out by [`TaskService::list_tasks`]
pub type TaskList = Arc<Vec<Task>>;

/// The process-wide task-list cache keyed by user id
pub type UserTaskCache = TaskListCache<UserId, TaskList>;

#[derive(Clone, Debug)]
pub struct TaskListing {
    pub tasks: TaskList,
    pub from_cache: bool,
}

/// Application service that fronts the task store with the task-list cache.
///
/// Reads go through the cache; every write invalidates the owner's entry
/// once the store has accepted the change.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    cache: Arc<UserTaskCache>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, cache: Arc<UserTaskCache>) -> Self {
        Self { store, cache }
    }

    pub fn cache(&self) -> &Arc<UserTaskCache> {
        &self.cache
    }

    pub async fn list_tasks(&self, user_id: UserId) -> Result<TaskListing> {
        if let Some(tasks) = self.cache.get(&user_id) {
            debug!("[cache hit] user {} - served {} task(s) from cache", user_id, tasks.len());
            return Ok(TaskListing {
                tasks,
                from_cache: true,
            });
        }

        let tasks = Arc::new(self.store.list_for_user(user_id).await?);
        self.cache.set(user_id, tasks.clone());
        debug!("[cache miss] user {} - fetched {} task(s) from store", user_id, tasks.len());

        Ok(TaskListing {
            tasks,
            from_cache: false,
        })
    }

    pub async fn create_task(&self, user_id: UserId, task: NewTask) -> Result<Task> {
        let created = self.store.insert(user_id, task).await?;
        self.cache.invalidate(&user_id);
        Ok(created)
    }

    pub async fn update_task(&self, user_id: UserId, task_id: TaskId, patch: TaskPatch) -> Result<Task> {
        if self.store.find(user_id, task_id).await?.is_none() {
            return Err(Error::TaskNotFound(task_id));
        }

        if patch.is_empty() {
            return Err(Error::Validation("No valid fields to update".to_string()));
        }

        let updated = self
            .store
            .update(user_id, task_id, patch)
            .await?
            .ok_or(Error::TaskNotFound(task_id))?;

        self.cache.invalidate(&user_id);
        Ok(updated)
    }

    pub async fn delete_task(&self, user_id: UserId, task_id: TaskId) -> Result<()> {
        if self.store.find(user_id, task_id).await?.is_none() {
            return Err(Error::TaskNotFound(task_id));
        }

        // a concurrent delete may have removed it since the lookup
        if !self.store.delete(user_id, task_id).await? {
            return Err(Error::TaskNotFound(task_id));
        }

        self.cache.invalidate(&user_id);
        Ok(())
    }

    pub fn purge_expired_listings(&self) -> usize {
        self.cache.purge_expired()
    }
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskService")
            .field("cache", &self.cache)
            .finish()
    }
}
