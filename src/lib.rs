//! TTL Cache - an in-process key-value cache with per-entry expiry
//!
//! Each entry may carry a time-to-live; expired entries are never observed
//! by readers and are removed by their own one-shot eviction timer.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::TtlCache;
pub use config::Config;
pub use tasks::spawn_reaper_task;
