//! Configuration Module
//!
//! Cache and application settings, loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_MAX_SIZE, DEFAULT_TTL_MS};
use crate::error::ConfigError;

/// Default key prefix for [`crate::storage::SecureStorage`]
pub const DEFAULT_STORAGE_PREFIX: &str = "inventory_";

/// Cache construction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Lifetime of each entry; zero makes every entry expire immediately
    pub ttl: Duration,
    /// Maximum number of entries retained after a `set`
    pub max_size: usize,
}

impl CacheConfig {
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self { ttl, max_size }
    }

    /// Loads the config from environment variables, falling back to the
    /// default for anything missing or unparsable.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Entry lifetime in milliseconds (default: 300000)
    /// - `CACHE_MAX_SIZE` - Maximum entries (default: 100)
    pub fn from_env() -> Self {
        Self {
            ttl: Duration::from_millis(
                env::var("CACHE_TTL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TTL_MS),
            ),
            max_size: env::var("CACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SIZE),
        }
    }

    /// Like [`CacheConfig::from_env`], but a set-yet-unparsable variable is an
    /// error instead of a silent default.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            ttl: Duration::from_millis(parse_var("CACHE_TTL_MS")?.unwrap_or(DEFAULT_TTL_MS)),
            max_size: parse_var("CACHE_MAX_SIZE")?.unwrap_or(DEFAULT_MAX_SIZE),
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(DEFAULT_TTL_MS),
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

/// Settings for assembling an [`crate::context::AppContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub cache: CacheConfig,
    /// Directory for persisted items; `None` keeps them in memory
    pub storage_dir: Option<PathBuf>,
    /// Namespace prepended to every persisted key
    pub storage_prefix: String,
}

impl AppConfig {
    /// Loads the cache settings plus `STORAGE_DIR` and `STORAGE_PREFIX`.
    pub fn from_env() -> Self {
        Self {
            cache: CacheConfig::from_env(),
            storage_dir: env::var_os("STORAGE_DIR").map(PathBuf::from),
            storage_prefix: env::var("STORAGE_PREFIX")
                .unwrap_or_else(|_| DEFAULT_STORAGE_PREFIX.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            storage_dir: None,
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
        }
    }
}

fn parse_var<V: FromStr>(var: &'static str) -> Result<Option<V>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(None),
    }
}
