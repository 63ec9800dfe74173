//! Application Context
//!
//! Explicitly constructed owner of the shared cache, device storage and retry
//! policy. The embedding application builds one at startup and clones it into
//! whatever needs it; nothing here lives in a global.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::cache::Cache;
use crate::config::AppConfig;
use crate::error::Result;
use crate::retry::RetryConfig;
use crate::storage::{FileBackend, MemoryBackend, SecureStorage, StorageBackend};

/// Storage with the backend chosen at runtime.
pub type DeviceStorage = SecureStorage<Box<dyn StorageBackend>>;

/// Shared services for one application instance.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Cache for API responses such as product and warehouse lists
    pub cache: Cache<Value>,
    pub storage: Arc<DeviceStorage>,
    pub retry: RetryConfig,
}

impl AppContext {
    /// Assembles the context. Opening a storage directory is the only step
    /// that can fail.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let backend: Box<dyn StorageBackend> = match &config.storage_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "using file-backed storage");
                Box::new(FileBackend::open(dir)?)
            }
            None => {
                info!("no storage directory configured, using in-memory storage");
                Box::new(MemoryBackend::new())
            }
        };

        info!(
            ttl_ms = config.cache.ttl.as_millis() as u64,
            max_size = config.cache.max_size,
            "initializing response cache"
        );

        Ok(Self {
            cache: Cache::new(config.cache.clone()),
            storage: Arc::new(SecureStorage::with_prefix(
                backend,
                config.storage_prefix.clone(),
            )),
            retry: RetryConfig::default(),
        })
    }
}
