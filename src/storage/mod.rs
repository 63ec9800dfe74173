//! Storage Module
//!
//! Small persistent key/value layer for device-local state: a backend trait
//! with in-memory and file-backed implementations, and [`SecureStorage`],
//! which namespaces keys and obfuscates the stored JSON.

mod backend;
mod secure;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use secure::SecureStorage;
