//! Configuration Module
//!
//! Handles loading the service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Environment variable holding the reaper interval in milliseconds.
pub const REAPER_INTERVAL_VAR: &str = "REAPER_INTERVAL_MS";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interval of the expired entry reaper in milliseconds, 0 disables it
    pub reaper_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REAPER_INTERVAL_MS` - Reaper interval in milliseconds, 0 = disabled (default: 1000)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Creates a Config from an arbitrary variable lookup.
    ///
    /// Unset variables fall back to their default. Set but malformed
    /// variables are reported instead of being silently ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            reaper_interval_ms: parse_var(&lookup, REAPER_INTERVAL_VAR, defaults.reaper_interval_ms)?,
        })
    }

    /// Returns the reaper interval, or None when the reaper is disabled.
    pub fn reaper_interval(&self) -> Option<Duration> {
        (self.reaper_interval_ms > 0).then(|| Duration::from_millis(self.reaper_interval_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reaper_interval_ms: 1000,
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        None => Ok(default),
    }
}
