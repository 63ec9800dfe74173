//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cached value with its creation and expiry instants.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached payload, opaque to the cache
    pub data: T,
    /// Creation instant
    pub created_at: Instant,
    /// Absolute expiry instant, `created_at + ttl`
    pub expires_at: Instant,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry stamped at `now` that expires after `ttl`.
    pub fn new(data: T, now: Instant, ttl: Duration) -> Self {
        Self {
            data,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is logically absent at `now`.
    ///
    /// Boundary condition: the entry is expired once `now >= expires_at`, so a
    /// zero TTL produces an entry that is expired from the moment it is stored.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at <= now
    }

    // == Is Past Expiry ==
    /// Strict variant used by the periodic sweep: `expires_at < now`.
    pub fn is_past_expiry(&self, now: Instant) -> bool {
        self.expires_at < now
    }

    // == Time To Live ==
    /// Returns the time left before expiry, or zero once expired.
    pub fn ttl_remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }

    /// Returns how long the entry has been resident.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}
