use std::sync::Arc;
use std::time::Duration;
use taskboard::TaskService;
use tokio::task::JoinHandle;
use tracing::debug;

/// Periodically drop expired task listings nobody has asked for again.
///
/// Lookups already expire entries on their own; this only bounds how long
/// a never-read entry stays in memory.
pub fn spawn_cache_sweeper(service: Arc<TaskService>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // the first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            let removed = service.purge_expired_listings();
            if removed > 0 {
                debug!("Swept {} expired task listing(s)", removed);
            }
        }
    })
}
