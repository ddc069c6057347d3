// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential guard for a single API secret.
//!
//! The secret is sealed with AES-256-GCM under a per-profile random key and
//! persisted through a [`logos_core::LocalStore`]. Crypto failures degrade to
//! tagged outcomes instead of errors:
//! - [`SaveOutcome::Fallback`] when the primitive is unavailable at save time;
//! - [`Retrieved::Unverified`] when a stored value does not decrypt.
//!
//! Only [`Retrieved::expose`] and the host's explicit reveal path ever see the
//! plaintext; `Debug` output on every type here is redacted.

pub mod crypto;
pub mod guard;
pub mod mask;
pub mod migration;
pub mod outcome;
pub mod prompt;
mod records;

pub use crypto::RingCipher;
pub use guard::CredentialGuard;
pub use mask::mask_secret;
pub use migration::{MigrationReport, migrate_legacy_secret, startup_check};
pub use outcome::{DecryptFailure, Retrieved, SaveOutcome};
pub use prompt::{SECRET_ENV_VAR, read_secret_input};
pub use records::is_reserved;
