use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::{Error, Result};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use taskboard::domain::{ApiLog, NewApiLog, NewTask, Task, TaskId, TaskPatch, User, UserId};
use taskboard::ports::{ApiLogRepository, TaskStore, UserRepository};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// On-disk layout of the database file
#[derive(Clone, Debug, Serialize, Deserialize)]
struct Database {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    api_logs: Vec<ApiLog>,
    next_user_id: u64,
    next_task_id: u64,
    next_log_id: u64,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            tasks: Vec::new(),
            api_logs: Vec::new(),
            next_user_id: 1,
            next_task_id: 1,
            next_log_id: 1,
        }
    }
}

fn newest_first(a: &Task, b: &Task) -> Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

/// JSON-file backed store for users, tasks and the API log.
///
/// The whole database lives in memory behind a lock and the file is rewritten
/// after every mutation. A mutation is only visible once the file write has
/// succeeded.
pub struct JsonFileStore {
    path: Option<PathBuf>,
    db: RwLock<Database>,
}

impl JsonFileStore {
    /// Open the database file, creating an empty one if it does not exist
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let db = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Database>(&bytes).map_err(|e| {
                Error::Storage(format!("Failed to parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No database at {}, creating an empty one", path.display());
                let db = Database::default();
                write_file(&path, &db).await?;
                db
            }
            Err(e) => {
                return Err(Error::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        info!(
            "Opened database {} ({} users, {} tasks, {} log entries)",
            path.display(),
            db.users.len(),
            db.tasks.len(),
            db.api_logs.len()
        );

        Ok(Self {
            path: Some(path),
            db: RwLock::new(db),
        })
    }

    /// A store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            path: None,
            db: RwLock::new(Database::default()),
        }
    }

    /// Apply `change` to a copy of the database, persist it, then publish it.
    async fn mutate<T>(&self, change: impl FnOnce(&mut Database) -> T) -> Result<T> {
        self.try_mutate(|db| Ok(change(db))).await
    }

    /// Like [`mutate`](Self::mutate), but `change` may reject the edit.
    /// A rejected edit is neither persisted nor published.
    async fn try_mutate<T>(&self, change: impl FnOnce(&mut Database) -> Result<T>) -> Result<T> {
        let mut db = self.db.write().await;
        let mut next = db.clone();
        let out = change(&mut next)?;

        if let Some(path) = &self.path {
            write_file(path, &next).await?;
        }

        *db = next;
        Ok(out)
    }
}

async fn write_file(path: &Path, db: &Database) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Storage(format!("Failed to create directory: {}", e)))?;
    }

    let bytes = serde_json::to_vec_pretty(db)
        .map_err(|e| Error::Internal(format!("Failed to serialize database: {}", e)))?;

    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| Error::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

    debug!("Persisted database to {}", path.display());
    Ok(())
}

#[async_trait]
impl TaskStore for JsonFileStore {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Task>> {
        let db = self.db.read().await;
        let mut tasks: Vec<Task> = db
            .tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by(newest_first);
        Ok(tasks)
    }

    async fn list_all(&self) -> Result<Vec<Task>> {
        let mut tasks = self.db.read().await.tasks.clone();
        tasks.sort_by(newest_first);
        Ok(tasks)
    }

    async fn find(&self, user_id: UserId, task_id: TaskId) -> Result<Option<Task>> {
        let db = self.db.read().await;
        Ok(db
            .tasks
            .iter()
            .find(|t| t.id == task_id && t.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, user_id: UserId, task: NewTask) -> Result<Task> {
        self.mutate(|db| {
            let now = Utc::now();
            let created = Task {
                id: db.next_task_id,
                user_id,
                title: task.title,
                status: task.status,
                created_at: now,
                updated_at: now,
            };
            db.next_task_id += 1;
            db.tasks.push(created.clone());
            created
        })
        .await
    }

    async fn update(&self, user_id: UserId, task_id: TaskId, patch: TaskPatch) -> Result<Option<Task>> {
        self.mutate(|db| {
            db.tasks
                .iter_mut()
                .find(|t| t.id == task_id && t.user_id == user_id)
                .map(|task| {
                    patch.apply(task, Utc::now());
                    task.clone()
                })
        })
        .await
    }

    async fn delete(&self, user_id: UserId, task_id: TaskId) -> Result<bool> {
        self.mutate(|db| {
            let before = db.tasks.len();
            db.tasks.retain(|t| !(t.id == task_id && t.user_id == user_id));
            db.tasks.len() != before
        })
        .await
    }
}

#[async_trait]
impl UserRepository for JsonFileStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User> {
        self.try_mutate(|db| {
            // checked under the write lock so concurrent signups cannot both pass
            if db.users.iter().any(|u| u.email == email) {
                return Err(Error::Conflict(format!("user {}", email)));
            }

            let user = User {
                id: db.next_user_id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at: Utc::now(),
            };
            db.next_user_id += 1;
            db.users.push(user.clone());
            Ok(user)
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let db = self.db.read().await;
        Ok(db.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let db = self.db.read().await;
        Ok(db.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        Ok(self.db.read().await.users.clone())
    }
}

#[async_trait]
impl ApiLogRepository for JsonFileStore {
    async fn append(&self, entry: NewApiLog) -> Result<ApiLog> {
        self.mutate(|db| {
            let log = ApiLog {
                id: db.next_log_id,
                method: entry.method,
                path: entry.path,
                timestamp: entry.timestamp,
                user_id: entry.user_id,
                status_code: entry.status_code,
                response_time_ms: entry.response_time_ms,
            };
            db.next_log_id += 1;
            db.api_logs.push(log.clone());
            log
        })
        .await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ApiLog>> {
        let db = self.db.read().await;
        let mut logs = db.api_logs.clone();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        logs.truncate(limit);
        Ok(logs)
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .finish()
    }
}
