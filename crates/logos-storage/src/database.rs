// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and migrations.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use logos_core::LogosError;
use tracing::debug;

use crate::migrations;

/// A migrated SQLite database behind tokio-rusqlite's single writer thread.
#[derive(Clone)]
pub(crate) struct Database {
    conn: tokio_rusqlite::Connection,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    /// Open (creating if needed) the database file at `path` and run migrations.
    pub(crate) async fn open(path: &str, wal_mode: bool) -> Result<Self, LogosError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(LogosError::storage)?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(LogosError::storage)?;
        let db = Self { conn };
        db.prepare(wal_mode).await?;
        debug!(path = %path, wal_mode, "local store database opened");
        Ok(db)
    }

    /// Open a private in-memory database (contents vanish on drop).
    pub(crate) async fn open_in_memory() -> Result<Self, LogosError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(LogosError::storage)?;
        let db = Self { conn };
        db.prepare(false).await?;
        Ok(db)
    }

    async fn prepare(&self, wal_mode: bool) -> Result<(), LogosError> {
        let journal = if wal_mode { "WAL" } else { "DELETE" };
        self.conn
            .call(move |conn| -> Result<Result<(), refinery::Error>, rusqlite::Error> {
                conn.execute_batch(&format!(
                    "PRAGMA journal_mode = {journal};
                     PRAGMA synchronous = NORMAL;
                     PRAGMA busy_timeout = 5000;"
                ))?;
                Ok(migrations::run_migrations(conn))
            })
            .await
            .map_err(map_tr_err)?
            .map_err(LogosError::storage)
    }

    /// Returns the underlying connection handle.
    pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

/// Convert tokio-rusqlite errors to `LogosError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> LogosError {
    LogosError::Storage {
        source: Box::new(e),
    }
}
