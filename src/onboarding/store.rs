//! Onboarding state store — the durable "has finished onboarding" flag.
//!
//! The flag lives in a [`PreferenceStore`] under
//! `user_preferences/onboarding_completed`. A missing entry reads as `false`.
//! Committed values are republished on a `watch` channel so any number of
//! observers see each change.

use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, error, info, warn};

use crate::error::StorageError;
use crate::store::PreferenceStore;

use super::model::preference_keys;

/// Owner of the onboarding flag.
pub struct OnboardingStore {
    prefs: Arc<dyn PreferenceStore>,
    tx: watch::Sender<bool>,
    loaded: OnceCell<()>,
    // Keeps persist order and publish order identical.
    write_lock: Mutex<()>,
}

impl OnboardingStore {
    pub fn new(prefs: Arc<dyn PreferenceStore>) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            prefs,
            tx,
            loaded: OnceCell::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the flag straight from storage.
    pub async fn try_current(&self) -> Result<bool, StorageError> {
        let stored = self
            .prefs
            .get_bool(preference_keys::NAMESPACE, preference_keys::ONBOARDING_COMPLETED)
            .await?;
        Ok(stored.unwrap_or(false))
    }

    /// The committed flag. Loads from storage on first use.
    ///
    /// A storage failure is logged and reads as `false`, so the app still
    /// starts and shows onboarding.
    pub async fn current(&self) -> bool {
        self.ensure_loaded().await;
        *self.tx.borrow()
    }

    /// Stream of the flag: the current value first, then every committed change.
    pub async fn read_completed(&self) -> WatchStream<bool> {
        self.ensure_loaded().await;
        WatchStream::new(self.tx.subscribe())
    }

    /// Raw watch receiver, for observers that poll `borrow()`.
    pub async fn subscribe(&self) -> watch::Receiver<bool> {
        self.ensure_loaded().await;
        self.tx.subscribe()
    }

    /// Persist `true`. Errors propagate and are not retried.
    pub async fn write_completed(&self) -> Result<(), StorageError> {
        self.persist(true).await
    }

    /// Persist `false`, re-enabling onboarding on the next launch.
    pub async fn reset(&self) -> Result<(), StorageError> {
        self.persist(false).await?;
        info!("Onboarding flag reset");
        Ok(())
    }

    /// Submit `write_completed` on the runtime without waiting for it.
    ///
    /// The returned handle can be awaited or dropped. Nothing guarantees the
    /// write is durable before work issued after this call completes.
    pub fn submit_completed(self: &Arc<Self>) -> PendingWrite {
        let store = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let result = store.write_completed().await;
            if let Err(ref e) = result {
                warn!(error = %e, "Failed to persist onboarding completion");
            }
            result
        });
        PendingWrite { handle }
    }

    async fn persist(&self, value: bool) -> Result<(), StorageError> {
        self.ensure_loaded().await;
        let _guard = self.write_lock.lock().await;

        self.prefs
            .set_bool(
                preference_keys::NAMESPACE,
                preference_keys::ONBOARDING_COMPLETED,
                value,
            )
            .await?;

        let changed = self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
        debug!(value, changed, "Onboarding flag committed");
        Ok(())
    }

    async fn ensure_loaded(&self) {
        self.loaded
            .get_or_init(|| async {
                let value = match self.try_current().await {
                    Ok(value) => value,
                    Err(e) => {
                        error!(error = %e, "Failed to read onboarding flag, defaulting to not completed");
                        false
                    }
                };
                self.tx.send_replace(value);
            })
            .await;
    }
}

/// Handle to a submitted flag write.
#[must_use = "drop the handle explicitly to fire and forget"]
pub struct PendingWrite {
    handle: JoinHandle<Result<(), StorageError>>,
}

impl PendingWrite {
    /// Wait for the write to finish.
    pub async fn wait(self) -> Result<(), StorageError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(StorageError::Unavailable(format!("write task did not finish: {e}"))),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
