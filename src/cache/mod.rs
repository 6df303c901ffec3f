//! Cache Module
//!
//! Provides in-memory caching with per-entry TTL expiration.

mod entry;
mod eviction;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::{CacheEntry, EntryId};
pub use store::CacheStore;
pub use ttl_cache::TtlCache;
