// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store with write accounting and fault injection.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use logos_core::{HealthStatus, LocalStore, LogosError, StoreKind, WriteBatch};
use logos_storage::MemoryStore;

/// Wraps a [`MemoryStore`].
///
/// Every `set`, `remove`, and `apply` counts as one write. A configured write
/// delay sleeps before the write lands, which widens the window for
/// interleaving in concurrency tests.
#[derive(Debug, Default)]
pub struct InstrumentedStore {
    inner: MemoryStore,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_delay: Option<Duration>,
}

impl InstrumentedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `delay` before each write.
    pub fn with_write_delay(delay: Duration) -> Self {
        Self {
            write_delay: Some(delay),
            ..Self::default()
        }
    }

    /// Number of writes that reached the inner store.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> BTreeMap<String, String> {
        self.inner.snapshot().await
    }

    async fn before_write(&self) -> Result<(), LogosError> {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LogosError::storage("injected write failure"));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl LocalStore for InstrumentedStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn get(&self, key: &str) -> Result<Option<String>, LogosError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(LogosError::storage("injected read failure"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LogosError> {
        self.before_write().await?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), LogosError> {
        self.before_write().await?;
        self.inner.remove(key).await
    }

    async fn apply(&self, batch: WriteBatch) -> Result<(), LogosError> {
        self.before_write().await?;
        self.inner.apply(batch).await
    }

    /// Unhealthy while reads are failing.
    async fn health_check(&self) -> Result<HealthStatus, LogosError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Unhealthy("injected read failure".into()));
        }
        self.inner.health_check().await
    }
}
