//! In-memory `PreferenceStore` for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::traits::PreferenceStore;

/// Volatile preference store.
///
/// `set_failing(true)` makes every operation return
/// `StorageError::Unavailable`, which is how tests simulate a broken disk.
#[derive(Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<(String, String), bool>>,
    failing: AtomicBool,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated storage failure.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self, op: &str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable(format!("{op}: simulated failure")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn get_bool(&self, namespace: &str, key: &str) -> Result<Option<bool>, StorageError> {
        self.check("get_bool")?;
        let values = self.values.read().await;
        Ok(values
            .get(&(namespace.to_string(), key.to_string()))
            .copied())
    }

    async fn set_bool(&self, namespace: &str, key: &str, value: bool) -> Result<(), StorageError> {
        self.check("set_bool")?;
        self.values
            .write()
            .await
            .insert((namespace.to_string(), key.to_string()), value);
        Ok(())
    }

    async fn remove(&self, namespace: &str, key: &str) -> Result<bool, StorageError> {
        self.check("remove")?;
        Ok(self
            .values
            .write()
            .await
            .remove(&(namespace.to_string(), key.to_string()))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_key_reads_none() {
        let store = MemoryPreferences::new();
        assert_eq!(store.get_bool("ns", "missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn failure_injection() {
        let store = MemoryPreferences::new();
        store.set_bool("ns", "k", true).await.unwrap();

        store.set_failing(true);
        assert!(matches!(
            store.get_bool("ns", "k").await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(store.set_bool("ns", "k", false).await.is_err());

        store.set_failing(false);
        assert_eq!(store.get_bool("ns", "k").await.unwrap(), Some(true));
    }
}
