//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Reaper: best-effort removal of expired entries at a configured interval

mod reaper;

pub use reaper::spawn_reaper_task;
