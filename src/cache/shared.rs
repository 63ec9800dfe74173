//! Shared Cache Handle
//!
//! Thread-safe handle over a [`CacheStore`] that owns the periodic sweep.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::warn;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::tasks::{spawn_sweep_task, sweep_interval, SweepGuard};

struct Inner<T> {
    store: Arc<Mutex<CacheStore<T>>>,
    sweeper: Option<SweepGuard>,
}

// == Cache ==
/// Cloneable handle to a bounded, time-expiring key/value cache.
///
/// Every clone shares the same entries. The store lock is held for the whole
/// of each operation, so `get`'s lazy delete, `set`'s evict-then-insert and
/// the sweep's scan-and-replace never interleave. When the last handle is
/// dropped the sweep task is cancelled.
///
/// # Example
/// ```ignore
/// let cache: Cache<Product> = Cache::new(CacheConfig::default());
/// cache.set("product:42", product);
/// assert!(cache.has("product:42"));
/// ```
pub struct Cache<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Cache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Cache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.inner.store.lock();
        f.debug_struct("Cache")
            .field("len", &store.len())
            .field("max_size", &store.max_size())
            .field("ttl", &store.ttl())
            .field("sweeping", &self.inner.sweeper.is_some())
            .finish()
    }
}

impl<T: Send + 'static> Cache<T> {
    // == Constructor ==
    /// Creates a cache and starts its sweep on the current tokio runtime.
    ///
    /// Outside a runtime no sweep is started; expired entries are then only
    /// removed by `get` or [`Cache::purge_expired`].
    pub fn new(config: CacheConfig) -> Self {
        let store = Arc::new(Mutex::new(CacheStore::from_config(&config)));

        let sweeper = match Handle::try_current() {
            Ok(_) => {
                let handle = spawn_sweep_task(Arc::downgrade(&store), sweep_interval(config.ttl));
                Some(SweepGuard::new(handle))
            }
            Err(_) => {
                warn!("cache created outside a tokio runtime, periodic sweep disabled");
                None
            }
        };

        Self {
            inner: Arc::new(Inner { store, sweeper }),
        }
    }
}

impl<T> Cache<T> {
    /// Stores `data` under `key`, evicting the oldest entry if full.
    pub fn set(&self, key: impl Into<String>, data: T) {
        self.inner.store.lock().set(key, data);
    }

    /// Deletes the entry for `key`; no-op when absent.
    pub fn remove(&self, key: &str) {
        self.inner.store.lock().remove(key);
    }

    pub fn clear(&self) {
        self.inner.store.lock().clear();
    }

    /// True while `key` holds an unexpired entry. Never deletes.
    pub fn has(&self, key: &str) -> bool {
        self.inner.store.lock().has(key)
    }

    /// Runs a sweep immediately, returning how many entries were removed.
    pub fn purge_expired(&self) -> usize {
        self.inner.store.lock().purge_expired()
    }

    /// Physical entry count, including expired entries not yet removed.
    pub fn len(&self) -> usize {
        self.inner.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.store.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.store.lock().stats()
    }

    pub fn ttl(&self) -> Duration {
        self.inner.store.lock().ttl()
    }

    pub fn max_size(&self) -> usize {
        self.inner.store.lock().max_size()
    }

    /// Handle on the sweep task, if one is running.
    pub fn sweep_handle(&self) -> Option<AbortHandle> {
        self.inner.sweeper.as_ref().map(SweepGuard::abort_handle)
    }
}

impl<T: Clone> Cache<T> {
    /// Returns the value for `key`, deleting it first if it has expired.
    pub fn get(&self, key: &str) -> Option<T> {
        self.inner.store.lock().get(key)
    }
}
