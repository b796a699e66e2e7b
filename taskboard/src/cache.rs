//! Per-user task-list cache with a fixed time-to-live.
//!
//! Entries are stamped with a monotonic [`Instant`] when stored. Staleness is
//! only ever discovered by [`TaskListCache::get`]: an entry older than
//! [`TASK_LIST_TTL`] is removed by the lookup that finds it and reported as a
//! miss. Nothing runs in the background unless the caller drives
//! [`TaskListCache::purge_expired`] itself.
//!
//! The cache never fails, never logs and never touches storage. Dropping it
//! entirely only shifts read load back onto the authoritative store.

use dashmap::DashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;
use tokio::time::Instant;

/// How long a stored task list stays eligible to be served as a hit.
pub const TASK_LIST_TTL: Duration = Duration::from_millis(30_000);

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) > TASK_LIST_TTL
    }
}

/// Process-local memoization of one payload per key.
///
/// Generic over the key so the same component serves integer user ids and
/// string identity-provider ids. The payload is returned by clone; store an
/// `Arc` when the payload is large.
pub struct TaskListCache<K, V>
where
    K: Hash + Eq,
{
    entries: DashMap<K, CacheEntry<V>>,
}

impl<K, V> TaskListCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Store `value` under `key`, replacing any previous entry and restarting
    /// its staleness clock.
    pub fn set(&self, key: K, value: V) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Return the cached value if it is at most [`TASK_LIST_TTL`] old.
    ///
    /// An expired entry is removed as part of this call.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();

        {
            let entry = self.entries.get(key)?;
            if !entry.is_expired(now) {
                return Some(entry.value.clone());
            }
        }

        // Re-check under the shard lock: a concurrent `set` may have refreshed it.
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        None
    }

    /// Drop the entry for `key` regardless of its age. Absent keys are ignored.
    pub fn invalidate(&self, key: &K) {
        self.entries.remove(key);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Remove every expired entry and return how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });

        removed
    }

    /// Raw entry count, including expired entries not yet looked up.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for TaskListCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Debug for TaskListCache<K, V>
where
    K: Hash + Eq,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskListCache")
            .field("entry_count", &self.entries.len())
            .field("ttl_ms", &TASK_LIST_TTL.as_millis())
            .finish()
    }
}
