//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use tokio::task::AbortHandle;
use tokio::time::{Duration, Instant};

/// Identity of a single installed entry. Never reused within a store.
pub type EntryId = u64;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Monotonic deadline, None = no expiration
    pub expires_at: Option<Instant>,
    id: EntryId,
    /// Pending eviction task for this exact entry
    eviction: Option<AbortHandle>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// A zero `ttl` means the entry never expires. A deadline too far in the
    /// future to be represented is treated the same way.
    pub fn new(id: EntryId, value: V, ttl: Duration) -> Self {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Instant::now().checked_add(ttl)
        };

        Self {
            value,
            expires_at,
            id,
            eviction: None,
        }
    }

    /// Returns the identity this entry was installed with.
    pub fn id(&self) -> EntryId {
        self.id
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Eviction Handle ==
    pub(crate) fn attach_eviction(&mut self, handle: AbortHandle) {
        self.eviction = Some(handle);
    }

    pub(crate) fn has_pending_eviction(&self) -> bool {
        self.eviction.is_some()
    }

    /// Aborts the pending eviction task, if any.
    pub(crate) fn cancel_eviction(&mut self) {
        if let Some(handle) = self.eviction.take() {
            handle.abort();
        }
    }

    /// Forgets the eviction handle without aborting the task.
    ///
    /// Used by the eviction task itself when it removes its own entry.
    pub(crate) fn detach_eviction(&mut self) {
        self.eviction = None;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = CacheEntry::new(1, "test_value".to_string(), Duration::ZERO);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.id(), 1);
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
        assert!(!entry.has_pending_eviction());
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new(7, "test_value".to_string(), Duration::from_secs(60));

        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(1, "test", Duration::from_millis(100));
        let deadline = entry.expires_at.unwrap();

        assert!(!entry.is_expired_at(deadline - Duration::from_millis(1)));
        assert!(entry.is_expired_at(deadline), "Entry should be expired at boundary");
        assert!(entry.is_expired_at(deadline + Duration::from_millis(1)));
    }

    #[test]
    fn test_unrepresentable_deadline_never_expires() {
        let entry = CacheEntry::new(1, "test", Duration::MAX);

        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let entry = CacheEntry::new(1, "test", Duration::from_millis(50));

        tokio::time::advance(Duration::from_millis(49)).await;
        assert!(!entry.is_expired());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(entry.is_expired());
    }

    #[tokio::test]
    async fn test_cancel_eviction_aborts_task() {
        let task = tokio::spawn(std::future::pending::<()>());
        let mut entry = CacheEntry::new(1, "test", Duration::from_secs(1));
        entry.attach_eviction(task.abort_handle());
        assert!(entry.has_pending_eviction());

        entry.cancel_eviction();

        assert!(!entry.has_pending_eviction());
        assert!(task.await.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_detach_eviction_leaves_task_running() {
        let task = tokio::spawn(async { 42 });
        let mut entry = CacheEntry::new(1, "test", Duration::from_secs(1));
        entry.attach_eviction(task.abort_handle());

        entry.detach_eviction();

        assert!(!entry.has_pending_eviction());
        assert_eq!(task.await.unwrap(), 42);
    }
}
