//! In-memory storage backend — used by tests and as the degraded mode when
//! durable storage cannot be opened.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::traits::Storage;

/// Process-local storage. Contents die with the process.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn absent_key_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("funnel.profile").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_get_remove_roundtrip() {
        let storage = MemoryStorage::new();
        storage.put("k", &json!({"a": 1})).await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some(json!({"a": 1})));

        storage.put("k", &json!(2)).await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some(json!(2)));

        storage.remove("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
        // Removing again is a no-op.
        storage.remove("k").await.unwrap();
    }
}
