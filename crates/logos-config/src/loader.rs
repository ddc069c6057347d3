// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./logos.toml` > `~/.config/logos/logos.toml` > `/etc/logos/logos.toml`
//! with environment variable overrides via `LOGOS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LogosConfig;

/// System-wide config file location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/logos/logos.toml";

/// Local (working directory) config file name.
pub const LOCAL_CONFIG_FILE: &str = "logos.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/logos/logos.toml` (system-wide)
/// 3. `~/.config/logos/logos.toml` (user XDG config)
/// 4. `./logos.toml` (local directory)
/// 5. `LOGOS_*` environment variables
pub fn load_config() -> Result<LogosConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LogosConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LogosConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LogosConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LogosConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LogosConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/logos/logos.toml`, if the platform has a config directory.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("logos").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `LOGOS_STORAGE_DATABASE_PATH` must map to
/// `storage.database_path`, not `storage.database.path`.
///
/// `LOGOS_API_KEY` is the secret input variable, not a config key, and is
/// filtered out.
fn env_provider() -> Env {
    Env::prefixed("LOGOS_")
        .filter(|key| !key.as_str().eq_ignore_ascii_case("api_key"))
        .map(|key| map_env_key(key.as_str()).into())
}

/// Top-level sections an env key may address.
const ENV_SECTIONS: [&str; 3] = ["logging", "storage", "guard"];

/// `GUARD_MIGRATE_LEGACY` -> `guard.migrate_legacy`.
///
/// Figment passes the key with its original case. Keys outside a known
/// section pass through lowercased and are rejected as unknown fields.
fn map_env_key(raw: &str) -> String {
    let key = raw.to_ascii_lowercase();
    ENV_SECTIONS
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|field| format!("{section}.{field}"))
        })
        .unwrap_or(key)
}
