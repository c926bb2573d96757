//! libSQL storage backend — a single `kv` table holding the session blobs.
//!
//! Supports local file and in-memory databases. The schema is created on
//! open; there is nothing to migrate beyond that.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;

use crate::error::StorageError;
use crate::store::traits::Storage;

/// libSQL key-value backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlStorage {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlStorage {
    /// Open (or create) a local database file and ensure the schema.
    pub async fn new_local(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Open(format!("Failed to create storage directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StorageError::Open(format!("Failed to open libSQL database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StorageError::Open(format!("Failed to create connection: {e}")))?;

        let storage = Self {
            db: Arc::new(db),
            conn,
        };
        storage.init_schema().await?;
        info!(path = %path.display(), "Storage opened");
        Ok(storage)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StorageError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StorageError::Open(format!("Failed to open in-memory database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StorageError::Open(format!("Failed to create connection: {e}")))?;

        let storage = Self {
            db: Arc::new(db),
            conn,
        };
        storage.init_schema().await?;
        Ok(storage)
    }

    async fn init_schema(&self) -> Result<(), StorageError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| StorageError::Open(format!("init_schema: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl Storage for LibSqlStorage {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let mut rows = self
            .conn
            .query("SELECT value FROM kv WHERE key = ?1", params![key])
            .await
            .map_err(|e| StorageError::Query(format!("get: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let value_str: String = row
                    .get(0)
                    .map_err(|e| StorageError::Query(format!("get: {e}")))?;
                let value = serde_json::from_str(&value_str)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::Query(format!("get: {e}"))),
        }
    }

    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let value_str = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value_str, now],
            )
            .await
            .map_err(|e| StorageError::Query(format!("put: {e}")))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .await
            .map_err(|e| StorageError::Query(format!("remove: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn memory_backend_roundtrip() {
        let storage = LibSqlStorage::new_memory().await.unwrap();
        assert_eq!(storage.get("missing").await.unwrap(), None);

        storage
            .put("funnel.profile", &json!({"gender": "MALE"}))
            .await
            .unwrap();
        assert_eq!(
            storage.get("funnel.profile").await.unwrap(),
            Some(json!({"gender": "MALE"}))
        );

        storage.put("funnel.profile", &json!({"gender": "FEMALE"})).await.unwrap();
        assert_eq!(
            storage.get("funnel.profile").await.unwrap(),
            Some(json!({"gender": "FEMALE"}))
        );

        storage.remove("funnel.profile").await.unwrap();
        assert_eq!(storage.get("funnel.profile").await.unwrap(), None);
    }

    #[tokio::test]
    async fn local_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("funnel.db");

        {
            let storage = LibSqlStorage::new_local(&path).await.unwrap();
            storage.put("funnel.spots_left", &json!(42)).await.unwrap();
        }

        let storage = LibSqlStorage::new_local(&path).await.unwrap();
        assert_eq!(
            storage.get("funnel.spots_left").await.unwrap(),
            Some(json!(42))
        );
    }
}
