// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Logos credential guard.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Logos configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogosConfig {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Local store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Credential guard settings.
    #[serde(default)]
    pub guard: GuardConfig,
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Local store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file holding the local store.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("logos").join("local_store.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("local_store.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Credential guard configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    /// Import a plaintext secret left by older releases on startup.
    #[serde(default = "default_migrate_legacy")]
    pub migrate_legacy: bool,

    /// Record name older releases kept the plaintext secret under.
    #[serde(default = "default_legacy_record")]
    pub legacy_record: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            migrate_legacy: default_migrate_legacy(),
            legacy_record: default_legacy_record(),
        }
    }
}

fn default_migrate_legacy() -> bool {
    true
}

fn default_legacy_record() -> String {
    "openai_api_key".to_string()
}
