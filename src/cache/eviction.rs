//! Per-entry eviction timers.
//!
//! Every entry written with a non-zero TTL gets its own one-shot task that
//! sleeps until the entry's deadline, then removes the entry if it is still
//! the current one for its key.

use std::sync::Weak;

use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

use crate::cache::entry::EntryId;
use crate::cache::store::CacheStore;

/// Spawns the eviction task for the entry installed as `id` under `key`.
///
/// The task holds only a weak reference to the store, so a dropped cache
/// never stays alive because of its own timers. Must be called from within a
/// tokio runtime.
pub(crate) fn schedule_eviction<V>(
    store: Weak<RwLock<CacheStore<V>>>,
    key: String,
    id: EntryId,
    deadline: Instant,
) -> AbortHandle
where
    V: Send + Sync + 'static,
{
    let task = tokio::spawn(async move {
        sleep_until(deadline).await;

        let Some(store) = store.upgrade() else {
            return;
        };

        let removed = store.write().await.remove_if_current(&key, id);
        if removed {
            debug!(key = %key, entry_id = id, "TTL eviction: removed expired entry");
        } else {
            trace!(key = %key, entry_id = id, "TTL eviction: entry already superseded");
        }
    });

    task.abort_handle()
}
