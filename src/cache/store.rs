//! Cache Store Module
//!
//! Single-owner cache engine combining HashMap storage with insertion-order
//! eviction and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};
use crate::config::CacheConfig;

// == Cache Store ==
/// Bounded, time-expiring key/value storage.
///
/// All methods take `&mut self` or `&self`; sharing across tasks goes through
/// [`crate::cache::Cache`], which puts the store behind a mutex.
#[derive(Debug)]
pub struct CacheStore<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Residency order, oldest first
    order: InsertionOrder,
    stats: CacheStats,
    /// Maximum number of entries retained after a `set`
    max_size: usize,
    /// Lifetime given to every entry
    ttl: Duration,
}

impl<T> CacheStore<T> {
    // == Constructor ==
    /// Creates an empty store with the given capacity and TTL.
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_size,
            ttl,
        }
    }

    /// Creates an empty store from a [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_size, config.ttl)
    }

    // == Set ==
    /// Stores `data` under `key`, replacing any previous entry.
    ///
    /// When the store is full and `key` is new, the earliest inserted entry is
    /// evicted first. Overwriting keeps the key's original eviction slot but
    /// refreshes its creation and expiry instants.
    pub fn set(&mut self, key: impl Into<String>, data: T) {
        let key = key.into();
        let now = Instant::now();

        if self.max_size == 0 {
            debug!(key = %key, "cache has zero capacity, value not retained");
            return;
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_size {
            if let Some(evicted) = self.order.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(key = %evicted, "evicted oldest cache entry");
            }
        }

        if !is_overwrite {
            self.order.push(&key);
        }
        self.entries.insert(key, CacheEntry::new(data, now, self.ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Remove ==
    /// Deletes the entry for `key` if present.
    pub fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
    }

    // == Clear ==
    /// Deletes every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Has ==
    /// Returns true if `key` holds an entry that has not yet expired.
    ///
    /// Unlike [`CacheStore::get`], this never deletes an expired entry; it
    /// stays in place until the next `get` or sweep.
    pub fn has(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    // == Purge Expired ==
    /// Removes every entry whose expiry instant is strictly in the past.
    ///
    /// The surviving entries are collected into a fresh map which then
    /// replaces the old one. Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let previous = std::mem::take(&mut self.entries);
        let before = previous.len();

        let survivors: HashMap<String, CacheEntry<T>> = previous
            .into_iter()
            .filter(|(_, entry)| !entry.is_past_expiry(now))
            .collect();

        let removed = before - survivors.len();
        self.entries = survivors;

        if removed > 0 {
            let entries = &self.entries;
            self.order.retain(|key| entries.contains_key(key));
            self.stats.record_expirations(removed);
        }
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Physical entry count, including expired entries not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Keys from oldest to newest insertion.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().map(str::to_string).collect()
    }
}

impl<T: Clone> CacheStore<T> {
    // == Get ==
    /// Returns a clone of the value stored under `key`.
    ///
    /// An expired entry is deleted on the spot and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<T> {
        let now = Instant::now();

        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired_at(now),
        };

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.record_miss();
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            debug!(key = %key, "dropped expired cache entry on read");
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.data.clone())
    }
}
