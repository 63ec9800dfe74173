//! Inventory Cache - client-side data layer for the inventory app
//!
//! A bounded in-memory cache with TTL expiration and insertion-order
//! eviction, plus the retry helper and obfuscated device storage that sit
//! beside it.

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod retry;
pub mod storage;
pub mod tasks;

pub use cache::{Cache, CacheStats, CacheStore};
pub use config::{AppConfig, CacheConfig};
pub use context::AppContext;
pub use error::{ConfigError, StorageError};
pub use retry::{retry, Backoff, RetryConfig, RetryError};
pub use storage::{FileBackend, MemoryBackend, SecureStorage, StorageBackend};
