//! Cache Module
//!
//! Bounded in-memory key/value cache with TTL expiration and insertion-order
//! eviction.

mod entry;
mod order;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use shared::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default entry lifetime: five minutes
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Default capacity
pub const DEFAULT_MAX_SIZE: usize = 100;
