//! TTL Cache Module
//!
//! Thread-safe cache handle combining the store with per-entry eviction timers.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::Duration;
use tracing::trace;

use crate::cache::eviction::schedule_eviction;
use crate::cache::store::CacheStore;

// == TTL Cache ==
/// In-memory key-value cache where each entry may expire after a fixed TTL.
///
/// Cloning yields another handle to the same cache. All operations go through
/// a single `RwLock`; the eviction tasks take the same lock before removing
/// anything. Operations that may schedule timers must run inside a tokio
/// runtime.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ttl_cache::TtlCache;
///
/// # tokio_test::block_on(async {
/// let cache = TtlCache::new();
/// cache.set("user:1", "alice".to_string(), Duration::from_secs(30)).await;
///
/// assert_eq!(cache.get("user:1").await.as_deref(), Some("alice"));
/// assert!(cache.has("user:1").await);
/// # });
/// ```
#[derive(Debug)]
pub struct TtlCache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<V> Default for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new())),
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The previous entry's pending eviction is cancelled before the new one is
    /// installed. A zero `ttl` means the entry never expires; otherwise it
    /// expires `ttl` after this call.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let mut store = self.store.write().await;

        let (id, expires_at) = store.insert(key.clone(), value, ttl);
        trace!(key = %key, entry_id = id, ttl_ms = ttl.as_millis() as u64, "cache set");

        // The write lock is still held, so the task cannot run its removal
        // before its handle is attached to the entry.
        if let Some(deadline) = expires_at {
            let handle = schedule_eviction(Arc::downgrade(&self.store), key.clone(), id, deadline);
            store.attach_eviction(&key, id, handle);
        }
    }

    /// Like [`set`](Self::set) with a signed TTL in milliseconds.
    ///
    /// Negative TTLs are clamped to zero, i.e. the entry never expires.
    pub async fn set_millis(&self, key: impl Into<String>, value: V, ttl_ms: i64) {
        let ttl = Duration::from_millis(ttl_ms.max(0) as u64);
        self.set(key, value, ttl).await;
    }

    // == Get ==
    /// Returns a clone of the value for `key` if present and not expired.
    ///
    /// Reading never extends the entry's TTL.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.read().await.get(key).cloned()
    }

    // == Has ==
    /// True iff [`get`](Self::get) would return a value.
    pub async fn has(&self, key: &str) -> bool {
        self.store.read().await.contains(key)
    }

    // == Delete ==
    /// Removes the entry for `key` and cancels its pending eviction.
    ///
    /// Deleting an absent key is a no-op.
    pub async fn delete(&self, key: &str) {
        let removed = self.store.write().await.remove(key);
        trace!(key = %key, removed, "cache delete");
    }

    // == Clear ==
    /// Removes every entry and cancels every pending eviction.
    ///
    /// Also serves as the teardown hook: no scheduled work outlives this call.
    /// Returns the number of entries that were physically removed.
    pub async fn clear(&self) -> usize {
        self.store.write().await.clear()
    }

    // == Keys ==
    /// Returns the keys of all live entries, in no particular order.
    pub async fn keys(&self) -> Vec<String> {
        self.store.read().await.keys()
    }

    // == Size ==
    /// Returns the number of live entries, consistent with [`keys`](Self::keys).
    pub async fn size(&self) -> usize {
        self.store.read().await.len()
    }

    // == Purge Expired ==
    /// Physically removes entries whose deadline has already passed.
    ///
    /// Never needed for correctness; used by the background reaper.
    pub async fn purge_expired(&self) -> usize {
        self.store.write().await.purge_expired()
    }

    /// Number of entries that still have an eviction timer attached.
    pub async fn pending_evictions(&self) -> usize {
        self.store.read().await.pending_evictions()
    }
}
