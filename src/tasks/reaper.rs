//! Expired Entry Reaper
//!
//! Background task that periodically removes entries whose deadline has
//! passed but whose own eviction timer has not run yet.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlCache;

/// Spawns a background task that periodically purges expired cache entries.
///
/// Correctness never depends on this task: reads already treat expired
/// entries as absent. It only bounds how long expired values stay in memory
/// when eviction timers are delayed.
///
/// # Arguments
/// * `cache` - handle to the cache to purge
/// * `interval` - time between purge runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = TtlCache::<String>::new();
/// let reaper = spawn_reaper_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// reaper.abort();
/// ```
pub fn spawn_reaper_task<V>(cache: TtlCache<V>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting expired entry reaper");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;

            if removed > 0 {
                info!("Reaper: removed {} expired entries", removed);
            } else {
                debug!("Reaper: no expired entries found");
            }
        }
    })
}
