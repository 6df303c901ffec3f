//! Error types for the cache service
//!
//! Cache operations themselves are total; only the ambient setup around the
//! cache (configuration loading) can fail.

use thiserror::Error;

// == Config Error Enum ==
/// Error raised while loading the service configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is set but cannot be parsed
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Raw value as found in the environment
        value: String,
    },
}

// == Result Type Alias ==
/// Convenience Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
