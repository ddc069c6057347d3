// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`LocalStore`] trait.

use async_trait::async_trait;
use rusqlite::params;
use tracing::{debug, warn};

use logos_config::model::StorageConfig;
use logos_core::{HealthStatus, LocalStore, LogosError, StoreKind, StoreOp, WriteBatch};

use crate::database::{map_tr_err, Database};

/// Durable local store backed by the `local_store` table.
///
/// Every [`apply`](LocalStore::apply) runs inside one SQLite transaction, so
/// a batch is either fully visible or not at all, including across crashes.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open the store described by `config`, creating the file and running
    /// migrations as needed.
    pub async fn open(config: &StorageConfig) -> Result<Self, LogosError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        Ok(Self { db })
    }

    /// Open a throwaway in-memory store.
    pub async fn open_in_memory() -> Result<Self, LogosError> {
        Ok(Self {
            db: Database::open_in_memory().await?,
        })
    }

    /// Checkpoint the WAL so the database file is self-contained.
    pub async fn close(&self) -> Result<(), LogosError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("local store WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl LocalStore for SqliteStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Sqlite
    }

    async fn get(&self, key: &str) -> Result<Option<String>, LogosError> {
        let key = key.to_string();
        self.db
            .connection()
            .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
                let mut stmt = conn.prepare("SELECT value FROM local_store WHERE key = ?1")?;
                match stmt.query_row(params![key], |row| row.get(0)) {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await
            .map_err(map_tr_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LogosError> {
        self.apply(WriteBatch::new().set(key, value)).await
    }

    async fn remove(&self, key: &str) -> Result<(), LogosError> {
        self.apply(WriteBatch::new().remove(key)).await
    }

    async fn apply(&self, batch: WriteBatch) -> Result<(), LogosError> {
        if batch.is_empty() {
            return Ok(());
        }
        let op_count = batch.len();
        self.db
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                let tx = conn.transaction()?;
                for op in batch {
                    match op {
                        StoreOp::Set { key, value } => {
                            tx.execute(
                                "INSERT OR REPLACE INTO local_store (key, value, updated_at)
                                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
                                params![key, value],
                            )?;
                        }
                        StoreOp::Remove { key } => {
                            tx.execute("DELETE FROM local_store WHERE key = ?1", params![key])?;
                        }
                    }
                }
                tx.commit()
            })
            .await
            .map_err(map_tr_err)?;
        debug!(ops = op_count, "local store batch committed");
        Ok(())
    }

    /// Runs `PRAGMA quick_check`. A failed query reports the store as
    /// unhealthy rather than returning an error.
    async fn health_check(&self) -> Result<HealthStatus, LogosError> {
        let verdict = self
            .db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row("PRAGMA quick_check", [], |row| row.get(0))
            })
            .await;

        let status = match verdict {
            Ok(verdict) if verdict == "ok" => HealthStatus::Healthy,
            Ok(verdict) => {
                warn!(verdict = %verdict, "local store integrity check reported problems");
                HealthStatus::Degraded(verdict)
            }
            Err(e) => {
                warn!(error = %e, "local store health check failed");
                HealthStatus::Unhealthy(e.to_string())
            }
        };
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_store_round_trips_records() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        assert_eq!(store.kind(), StoreKind::Sqlite);
        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("secret-iv", "AAAA").await.unwrap();
        assert_eq!(store.get("secret-iv").await.unwrap().as_deref(), Some("AAAA"));

        store.set("secret-iv", "BBBB").await.unwrap();
        assert_eq!(store.get("secret-iv").await.unwrap().as_deref(), Some("BBBB"));

        store.remove("secret-iv").await.unwrap();
        assert_eq!(store.get("secret-iv").await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store.apply(WriteBatch::new()).await.unwrap();
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn batch_applies_in_order() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store
            .apply(
                WriteBatch::new()
                    .set("a", "first")
                    .set("a", "second")
                    .set("b", "x")
                    .remove("b"),
            )
            .await
            .unwrap();

        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("second"));
        assert_eq!(store.get("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_are_stored_verbatim() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        let value = "sk-••••\u{1F512} ' \" ; DROP TABLE local_store; --";
        store.set("weird", value).await.unwrap();
        assert_eq!(store.get("weird").await.unwrap().as_deref(), Some(value));
    }
}
