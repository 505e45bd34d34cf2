//! libSQL backend — durable `PreferenceStore` implementation.
//!
//! Supports local file and in-memory databases. Values are stored as JSON
//! text so the table can hold more than booleans later without a migration.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::store::migrations;
use crate::store::traits::PreferenceStore;

/// libSQL preference backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlPreferences {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlPreferences {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Unavailable(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StorageError::Unavailable(format!("Failed to open libSQL database: {e}")))?;

        let backend = Self::from_database(db).await?;
        info!(path = %path.display(), "Preference database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests and `:memory:` configs).
    pub async fn new_memory() -> Result<Self, StorageError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                StorageError::Unavailable(format!("Failed to create in-memory database: {e}"))
            })?;

        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, StorageError> {
        let conn = db
            .connect()
            .map_err(|e| StorageError::Unavailable(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl PreferenceStore for LibSqlPreferences {
    async fn get_bool(&self, namespace: &str, key: &str) -> Result<Option<bool>, StorageError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT value FROM preferences WHERE namespace = ?1 AND key = ?2",
                params![namespace, key],
            )
            .await
            .map_err(|e| StorageError::Unavailable(format!("get_bool: {e}")))?;

        let row = match rows.next().await {
            Ok(Some(row)) => row,
            Ok(None) => return Ok(None),
            Err(e) => return Err(StorageError::Unavailable(format!("get_bool: {e}"))),
        };

        let raw: String = row
            .get(0)
            .map_err(|e| StorageError::Unavailable(format!("get_bool: {e}")))?;
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Bool(value)) => Ok(Some(value)),
            Ok(other) => Err(StorageError::Corrupt {
                key: format!("{namespace}/{key}"),
                reason: format!("expected boolean, found {other}"),
            }),
            Err(e) => Err(StorageError::Corrupt {
                key: format!("{namespace}/{key}"),
                reason: e.to_string(),
            }),
        }
    }

    async fn set_bool(&self, namespace: &str, key: &str, value: bool) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        let value_str = serde_json::to_string(&serde_json::Value::Bool(value))
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        self.conn()
            .execute(
                "INSERT INTO preferences (namespace, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (namespace, key) DO UPDATE SET value = ?3, updated_at = ?4",
                params![namespace, key, value_str, now],
            )
            .await
            .map_err(|e| StorageError::Unavailable(format!("set_bool: {e}")))?;

        debug!(namespace, key, value, "Preference written");
        Ok(())
    }

    async fn remove(&self, namespace: &str, key: &str) -> Result<bool, StorageError> {
        let count = self
            .conn()
            .execute(
                "DELETE FROM preferences WHERE namespace = ?1 AND key = ?2",
                params![namespace, key],
            )
            .await
            .map_err(|e| StorageError::Unavailable(format!("remove: {e}")))?;
        Ok(count > 0)
    }
}
