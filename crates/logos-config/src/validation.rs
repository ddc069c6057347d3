// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::LogosConfig;

/// Log levels accepted by `logging.level`.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every validation error rather than failing fast.
pub fn validate_config(config: &LogosConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !VALID_LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let legacy = &config.guard.legacy_record;
    if legacy.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "guard.legacy_record must not be empty".to_string(),
        });
    } else if legacy.chars().any(char::is_whitespace) {
        errors.push(ConfigError::Validation {
            message: format!("guard.legacy_record `{legacy}` must not contain whitespace"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
