// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory local store.
//!
//! Holds records for the lifetime of the process. Used as the test fake for
//! the credential guard and by hosts that do not want durable state.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use logos_core::{LocalStore, LogosError, StoreKind, StoreOp, WriteBatch};

/// A `HashMap` behind an async lock. Batches apply under a single write guard.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records.
    pub fn with_records<I, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let records = records
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// A sorted copy of every record, for inspection in tests and diagnostics.
    pub async fn snapshot(&self) -> BTreeMap<String, String> {
        self.records
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn get(&self, key: &str) -> Result<Option<String>, LogosError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LogosError> {
        self.records
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), LogosError> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn apply(&self, batch: WriteBatch) -> Result<(), LogosError> {
        let mut records = self.records.write().await;
        for op in batch {
            match op {
                StoreOp::Set { key, value } => {
                    records.insert(key, value);
                }
                StoreOp::Remove { key } => {
                    records.remove(&key);
                }
            }
        }
        Ok(())
    }
}
