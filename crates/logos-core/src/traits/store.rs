// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local key/value store trait backing the credential guard.

use async_trait::async_trait;

use crate::error::LogosError;
use crate::types::{HealthStatus, StoreKind, StoreOp, WriteBatch};

/// A durable mapping from string keys to string values.
///
/// This is the only persistence surface the credential guard sees. Values
/// survive process restarts until explicitly removed (for durable stores).
#[async_trait]
pub trait LocalStore: Send + Sync + 'static {
    /// Returns which backend this store is.
    fn kind(&self) -> StoreKind;

    /// Read a record. Absent keys return `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>, LogosError>;

    /// Insert or replace a record.
    async fn set(&self, key: &str, value: &str) -> Result<(), LogosError>;

    /// Remove a record. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), LogosError>;

    /// Apply a batch of mutations in order.
    ///
    /// The default applies each operation sequentially and is therefore not
    /// atomic. Backends that can offer atomicity must override this.
    async fn apply(&self, batch: WriteBatch) -> Result<(), LogosError> {
        for op in batch {
            match op {
                StoreOp::Set { key, value } => self.set(&key, &value).await?,
                StoreOp::Remove { key } => self.remove(&key).await?,
            }
        }
        Ok(())
    }

    /// Check that the backend is reachable.
    async fn health_check(&self) -> Result<HealthStatus, LogosError> {
        Ok(HealthStatus::Healthy)
    }
}
