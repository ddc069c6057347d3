// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Logos credential guard.

use thiserror::Error;

/// The primary error type used across the Logos seam traits and guard operations.
#[derive(Debug, Error)]
pub enum LogosError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Local store errors (database connection, query failure, I/O).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Cipher primitive errors (RNG unavailable, seal/open failure).
    ///
    /// Raised inside the [`AeadCipher`](crate::AeadCipher) seam. The credential
    /// guard converts these into degraded outcomes instead of returning them.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Credential guard errors that are not crypto degradation (e.g. empty input).
    #[error("guard error: {0}")]
    Guard(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LogosError {
    /// Wrap any error as a storage failure.
    pub fn storage<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        LogosError::Storage {
            source: source.into(),
        }
    }
}
