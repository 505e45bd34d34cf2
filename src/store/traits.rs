//! `PreferenceStore` trait — async interface over a namespaced key-value store.

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend-agnostic preference storage.
///
/// Single-key reads and writes are atomic. Callers that need read-after-write
/// ordering across independently spawned tasks must order those tasks
/// themselves.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read a boolean preference. `Ok(None)` when the key was never written.
    async fn get_bool(&self, namespace: &str, key: &str) -> Result<Option<bool>, StorageError>;

    /// Write a boolean preference, replacing any previous value.
    async fn set_bool(&self, namespace: &str, key: &str, value: bool) -> Result<(), StorageError>;

    /// Remove a preference. Returns whether a value existed.
    async fn remove(&self, namespace: &str, key: &str) -> Result<bool, StorageError>;
}
