//! Key-value store for persisted user preferences.
//!
//! One [`PreferenceStore`] is created per process and handed to every
//! consumer; clones share the same backend and the same change channel, so a
//! `set` through one handle is seen by every subscriber.

mod preferences;

pub use preferences::*;

use chrono::Utc;
use newsdeck_core::{CoreError, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Emitted after every successful write. `value` is `None` for removals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceChange {
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone)]
enum Backend {
    Memory(Arc<RwLock<HashMap<String, String>>>),
    Sqlite(SqlitePool),
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    backend: Backend,
    changes: broadcast::Sender<PreferenceChange>,
}

impl PreferenceStore {
    pub fn in_memory() -> Self {
        Self::with_backend(Backend::Memory(Arc::new(RwLock::new(HashMap::new()))))
    }

    /// Opens (creating if needed) a SQLite database. Call
    /// [`run_migrations`](Self::run_migrations) before first use.
    pub async fn connect(database_url: &str) -> Result<Self, CoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::ConnectionFailed {
                reason: e.to_string(),
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::ConnectionFailed {
                reason: e.to_string(),
            })?;

        info!("Connected to preference database at {}", database_url);
        Ok(Self::with_backend(Backend::Sqlite(pool)))
    }

    fn with_backend(backend: Backend) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { backend, changes }
    }

    pub async fn run_migrations(&self) -> Result<(), CoreError> {
        let Backend::Sqlite(pool) = &self.backend else {
            return Ok(());
        };

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
        )
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationFailed {
            migration: format!("create settings table: {e}"),
        })?;

        debug!("Preference store migrations applied");
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match &self.backend {
            Backend::Memory(map) => Ok(map.read().await.get(key).cloned()),
            Backend::Sqlite(pool) => {
                let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
                    .bind(key)
                    .fetch_optional(pool)
                    .await
                    .map_err(StoreError::from)?;
                match row {
                    Some(row) => Ok(Some(
                        row.try_get::<String, _>("value")
                            .map_err(StoreError::from)?,
                    )),
                    None => Ok(None),
                }
            }
        }
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        match &self.backend {
            Backend::Memory(map) => {
                map.write().await.insert(key.to_string(), value.to_string());
            }
            Backend::Sqlite(pool) => {
                sqlx::query(
                    "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?)
                     ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = excluded.updated_at",
                )
                .bind(key)
                .bind(value)
                .bind(Utc::now().timestamp())
                .execute(pool)
                .await
                .map_err(StoreError::from)?;
            }
        }

        debug!("Saved preference {}", key);
        self.notify(key, Some(value.to_string()));
        Ok(())
    }

    /// Deletes a key. Returns whether it existed.
    pub async fn remove(&self, key: &str) -> Result<bool, CoreError> {
        let existed = match &self.backend {
            Backend::Memory(map) => map.write().await.remove(key).is_some(),
            Backend::Sqlite(pool) => {
                let result = sqlx::query("DELETE FROM settings WHERE key = ?")
                    .bind(key)
                    .execute(pool)
                    .await
                    .map_err(StoreError::from)?;
                result.rows_affected() > 0
            }
        };

        if existed {
            debug!("Removed preference {}", key);
            self.notify(key, None);
        }
        Ok(existed)
    }

    /// Receives every change made through any clone of this store from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<PreferenceChange> {
        self.changes.subscribe()
    }

    fn notify(&self, key: &str, value: Option<String>) {
        // No receivers is not an error: nobody is listening yet.
        let _ = self.changes.send(PreferenceChange {
            key: key.to_string(),
            value,
        });
    }
}
