// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local key/value stores for the Logos credential guard.
//!
//! Two implementations of [`logos_core::LocalStore`]:
//! - [`MemoryStore`]: process-lifetime map, the fake used in guard tests.
//! - [`SqliteStore`]: durable WAL-mode SQLite table with embedded migrations
//!   and single-writer serialization via `tokio-rusqlite`.

mod database;
pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
