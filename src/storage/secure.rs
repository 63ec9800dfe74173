//! Obfuscated, namespaced item storage.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::config::DEFAULT_STORAGE_PREFIX;
use crate::error::{Result, StorageError};
use crate::storage::StorageBackend;

/// Persists serde values as `base64(json)` under a key prefix.
///
/// The encoding only keeps values from being readable at a glance; it is not
/// encryption and must not hold secrets.
///
/// Writes report failures. Reads follow a catch-and-log contract: anything
/// missing, unreadable or corrupt comes back as `None` with a warning.
#[derive(Debug)]
pub struct SecureStorage<B> {
    backend: B,
    prefix: String,
}

impl<B: StorageBackend> SecureStorage<B> {
    pub fn new(backend: B) -> Self {
        Self::with_prefix(backend, DEFAULT_STORAGE_PREFIX)
    }

    pub fn with_prefix(backend: B, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Serializes and stores `value` under `key`.
    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend.write(&self.full_key(key), &BASE64.encode(json))
    }

    /// Loads and decodes the item under `key`.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get_item(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to read stored item");
                None
            }
        }
    }

    /// Like [`SecureStorage::get_item`] but reports why a read failed.
    pub fn try_get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(encoded) = self.backend.read(&self.full_key(key))? else {
            return Ok(None);
        };
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|err| StorageError::Decode(err.to_string()))?;
        let json = String::from_utf8(bytes).map_err(|err| StorageError::Decode(err.to_string()))?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Deletes the item under `key`, logging rather than returning failures.
    pub fn remove_item(&self, key: &str) {
        if let Err(err) = self.backend.delete(&self.full_key(key)) {
            warn!(key = %key, error = %err, "failed to remove stored item");
        }
    }

    /// Deletes every item under this storage's prefix. Other keys in the same
    /// backend are left alone.
    pub fn clear(&self) {
        let keys = match self.backend.keys() {
            Ok(keys) => keys,
            Err(err) => {
                warn!(error = %err, "failed to list stored items");
                return;
            }
        };

        for key in keys.iter().filter(|k| k.starts_with(&self.prefix)) {
            if let Err(err) = self.backend.delete(key) {
                warn!(key = %key, error = %err, "failed to remove stored item");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileBackend, MemoryBackend};
    use serde::Deserialize;
    use tokio_test::{assert_err, assert_ok};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Draft {
        sku: String,
        quantity: u32,
        warehouse_id: Option<u64>,
    }

    fn draft() -> Draft {
        Draft {
            sku: "BOX-10".to_string(),
            quantity: 12,
            warehouse_id: Some(3),
        }
    }

    #[test]
    fn test_set_and_get_item() {
        let storage = SecureStorage::new(MemoryBackend::new());

        assert_ok!(storage.set_item("draft", &draft()));

        assert_eq!(storage.get_item::<Draft>("draft"), Some(draft()));
        assert_eq!(assert_ok!(storage.try_get_item::<Draft>("other")), None);
    }

    #[test]
    fn test_stored_value_is_prefixed_and_encoded() {
        let storage = SecureStorage::new(MemoryBackend::new());

        storage.set_item("draft", &draft()).unwrap();

        let raw = storage.backend().read("inventory_draft").unwrap().unwrap();
        assert!(!raw.contains("BOX-10"));
        let json = String::from_utf8(BASE64.decode(raw).unwrap()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["sku"], "BOX-10");
    }

    #[test]
    fn test_corrupt_item_reads_as_none() {
        let storage = SecureStorage::new(MemoryBackend::new());
        storage.backend().write("inventory_bad", "***not base64***").unwrap();
        storage
            .backend()
            .write("inventory_wrong_shape", &BASE64.encode("[1,2,3]"))
            .unwrap();

        assert_eq!(storage.get_item::<Draft>("bad"), None);
        let err = assert_err!(storage.try_get_item::<Draft>("bad"));
        assert!(matches!(err, StorageError::Decode(_)));

        assert_eq!(storage.get_item::<Draft>("wrong_shape"), None);
        let err = assert_err!(storage.try_get_item::<Draft>("wrong_shape"));
        assert!(matches!(err, StorageError::Serialize(_)));
    }

    #[test]
    fn test_remove_item() {
        let storage = SecureStorage::new(MemoryBackend::new());
        storage.set_item("draft", &draft()).unwrap();

        storage.remove_item("draft");
        storage.remove_item("draft");

        assert_eq!(storage.get_item::<Draft>("draft"), None);
    }

    #[test]
    fn test_clear_only_touches_own_prefix() {
        let storage = SecureStorage::with_prefix(MemoryBackend::new(), "app_");
        storage.set_item("a", &1).unwrap();
        storage.set_item("b", &2).unwrap();
        storage.backend().write("foreign", "keep").unwrap();

        storage.clear();

        assert_eq!(storage.get_item::<i32>("a"), None);
        assert_eq!(storage.get_item::<i32>("b"), None);
        assert_eq!(
            storage.backend().read("foreign").unwrap(),
            Some("keep".to_string())
        );
    }

    #[test]
    fn test_file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SecureStorage::new(FileBackend::open(dir.path()).unwrap());

        storage.set_item("draft", &draft()).unwrap();
        let reopened = SecureStorage::new(FileBackend::open(dir.path()).unwrap());

        assert_eq!(reopened.get_item::<Draft>("draft"), Some(draft()));
    }

    #[test]
    fn test_invalid_file_key_fails_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SecureStorage::new(FileBackend::open(dir.path()).unwrap());

        let result = storage.set_item("../escape", &1);

        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert_eq!(storage.get_item::<i32>("../escape"), None);
    }
}
