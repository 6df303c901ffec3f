//! Cache Store Module
//!
//! Synchronous core of the cache: the key/entry mapping plus the
//! bookkeeping for pending evictions. Locking and timer scheduling live in
//! [`TtlCache`](crate::cache::TtlCache); everything here assumes exclusive
//! access has already been arranged by the caller.

use std::collections::HashMap;

use tokio::task::AbortHandle;
use tokio::time::{Duration, Instant};

use crate::cache::entry::{CacheEntry, EntryId};

// == Cache Store ==
/// Key-value storage with per-entry expiry deadlines.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Identity handed to the next installed entry
    next_id: EntryId,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_id: 1,
        }
    }

    // == Insert ==
    /// Installs `value` as the current entry for `key`.
    ///
    /// Any previous entry under the same key is dropped and its pending
    /// eviction cancelled. Returns the new entry's identity and deadline.
    pub fn insert(&mut self, key: String, value: V, ttl: Duration) -> (EntryId, Option<Instant>) {
        let id = self.next_id;
        self.next_id += 1;

        let entry = CacheEntry::new(id, value, ttl);
        let expires_at = entry.expires_at;

        if let Some(mut previous) = self.entries.insert(key, entry) {
            previous.cancel_eviction();
        }

        (id, expires_at)
    }

    /// Records the eviction task for the entry installed as `id`.
    ///
    /// Returns false (and aborts the task) if `key` no longer maps to that entry.
    pub(crate) fn attach_eviction(&mut self, key: &str, id: EntryId, handle: AbortHandle) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) if entry.id() == id => {
                entry.attach_eviction(handle);
                true
            }
            _ => {
                handle.abort();
                false
            }
        }
    }

    // == Get ==
    /// Returns the live entry for `key`, treating expired entries as absent.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| &entry.value)
    }

    /// True iff [`get`](Self::get) would return a value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Remove ==
    /// Removes the entry for `key`, cancelling its pending eviction.
    ///
    /// Returns whether an entry (live or expired) was physically removed.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(mut entry) => {
                entry.cancel_eviction();
                true
            }
            None => false,
        }
    }

    /// Removes `key` only if its current entry is still the one installed as `id`.
    ///
    /// This is the only removal an eviction task performs: an entry that was
    /// overwritten after the task was scheduled is left untouched.
    pub(crate) fn remove_if_current(&mut self, key: &str, id: EntryId) -> bool {
        let is_current = self
            .entries
            .get(key)
            .map_or(false, |entry| entry.id() == id);
        if !is_current {
            return false;
        }

        if let Some(mut entry) = self.entries.remove(key) {
            entry.detach_eviction();
        }
        true
    }

    // == Clear ==
    /// Removes every entry and cancels every pending eviction.
    ///
    /// Returns the number of entries physically removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        for (_, mut entry) in self.entries.drain() {
            entry.cancel_eviction();
        }
        count
    }

    // == Purge Expired ==
    /// Physically removes entries whose deadline has passed.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();

        self.entries.retain(|_, entry| {
            if entry.is_expired_at(now) {
                entry.cancel_eviction();
                false
            } else {
                true
            }
        });

        before - self.entries.len()
    }

    // == Keys ==
    /// Returns the keys of all live entries, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .values()
            .filter(|entry| !entry.is_expired_at(now))
            .count()
    }

    /// Returns true if there are no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries, live or not, with an eviction task still attached.
    pub fn pending_evictions(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.has_pending_eviction())
            .count()
    }
}

impl<V> Drop for CacheStore<V> {
    fn drop(&mut self) {
        self.clear();
    }
}
