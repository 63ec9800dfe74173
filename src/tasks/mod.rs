//! Background Tasks Module
//!
//! Contains the periodic expiry sweep owned by each [`crate::cache::Cache`].

mod sweep;

pub use sweep::{spawn_sweep_task, sweep_interval, SweepGuard, MIN_SWEEP_INTERVAL};
