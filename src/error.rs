//! Error types
//!
//! Cache operations are total and never fail; these errors belong to the
//! persistence and configuration layers around the cache.

use thiserror::Error;

// == Storage Error Enum ==
/// Failures from [`crate::storage`] backends and encoding.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend read or write failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be turned into or parsed from JSON
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Stored payload is not valid base64 or UTF-8
    #[error("Stored value is corrupt: {0}")]
    Decode(String),

    /// Key cannot be used by the backend
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

// == Config Error Enum ==
/// Failures while loading configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable is set but does not parse
    #[error("Invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
}

// == Result Type Alias ==
/// Convenience Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
