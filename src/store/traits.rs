//! Backend-agnostic `Storage` trait — namespaced keys to JSON values.

use async_trait::async_trait;

use crate::error::StorageError;

/// Storage keys used by the funnel. All keys share the `funnel.` namespace.
pub mod keys {
    /// The collected profile blob.
    pub const PROFILE: &str = "funnel.profile";
    /// RFC 3339 timestamp the session countdown started at.
    pub const SESSION_START: &str = "funnel.session_start";
    /// Last persisted "spots left" value.
    pub const SPOTS_LEFT: &str = "funnel.spots_left";
    /// Captured marketing attribution parameters.
    pub const ATTRIBUTION: &str = "funnel.attribution";
}

/// Durable key-value storage.
///
/// Keys are opaque strings, values are JSON. A missing key is the valid
/// "first visit" state, not an error. Implementations must be cheap enough
/// to await inline on every write.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read a value. `Ok(None)` means the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;

    /// Write a value, replacing any previous one.
    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError>;

    /// Delete a key. Deleting an absent key is a no-op.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
