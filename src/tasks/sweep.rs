//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Shortest interval the sweep will run at, so a zero TTL cannot spin.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Returns the sweep period for a given TTL: half the TTL, floored at
/// [`MIN_SWEEP_INTERVAL`].
pub fn sweep_interval(ttl: Duration) -> Duration {
    (ttl / 2).max(MIN_SWEEP_INTERVAL)
}

/// Spawns a task that purges expired entries from `store` every `interval`.
///
/// The task only holds a weak reference, so it never keeps the store alive.
/// It exits on its own once every strong reference is gone, and can be
/// stopped earlier by aborting the returned handle.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::<String>::new(100, ttl)));
/// let handle = spawn_sweep_task(Arc::downgrade(&store), sweep_interval(ttl));
/// // Later, on teardown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task<T>(store: Weak<Mutex<CacheStore<T>>>, interval: Duration) -> JoinHandle<()>
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting cache sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let Some(strong) = store.upgrade() else {
                    break;
                };
                let mut guard = strong.lock();
                guard.purge_expired()
            };

            if removed > 0 {
                info!(removed, "cache sweep removed expired entries");
            } else {
                debug!("cache sweep: no expired entries found");
            }
        }

        info!("cache dropped, sweep task exiting");
    })
}

// == Sweep Guard ==
/// Owns a running sweep task and aborts it when dropped.
#[derive(Debug)]
pub struct SweepGuard {
    handle: JoinHandle<()>,
}

impl SweepGuard {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    /// Handle that outlives the guard, for observing whether the task ended.
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SweepGuard {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("cache sweep task cancelled");
    }
}
