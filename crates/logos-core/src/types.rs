// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the store seam and its implementations.

use strum::{Display, EnumString};

/// Health status reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is fully operational.
    Healthy,
    /// Store is operational but experiencing issues.
    Degraded(String),
    /// Store is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    /// Lowercase label for display and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded(_) => "degraded",
            HealthStatus::Unhealthy(_) => "unhealthy",
        }
    }

    /// What went wrong, if anything.
    pub fn detail(&self) -> Option<&str> {
        match self {
            HealthStatus::Healthy => None,
            HealthStatus::Degraded(detail) | HealthStatus::Unhealthy(detail) => Some(detail),
        }
    }
}

/// Identifies the kind of local store backing the credential guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StoreKind {
    /// Process-lifetime map, used by tests and ephemeral hosts.
    Memory,
    /// Durable SQLite-backed key/value table.
    Sqlite,
}

/// A single mutation inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// Insert or replace `key` with `value`.
    Set { key: String, value: String },
    /// Remove `key` if present.
    Remove { key: String },
}

impl StoreOp {
    /// The record key this operation touches.
    pub fn key(&self) -> &str {
        match self {
            StoreOp::Set { key, .. } | StoreOp::Remove { key } => key,
        }
    }
}

/// An ordered group of store mutations that must land together.
///
/// Stores that can, apply the whole batch atomically: a reader observes
/// either none of the operations or all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<StoreOp>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an insert-or-replace.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ops.push(StoreOp::Set {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Append a removal.
    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.ops.push(StoreOp::Remove { key: key.into() });
        self
    }

    pub fn ops(&self) -> &[StoreOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

impl IntoIterator for WriteBatch {
    type Item = StoreOp;
    type IntoIter = std::vec::IntoIter<StoreOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}
