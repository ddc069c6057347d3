// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tagged results of guard operations.
//!
//! Crypto failures never surface as `Err`. They degrade to a weaker outcome
//! that callers can detect, log, or ignore.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// How [`CredentialGuard::save`](crate::CredentialGuard::save) persisted the secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Sealed with the AEAD primitive; only ciphertext was written.
    Encrypted,
    /// The primitive was unavailable; the plaintext was written verbatim.
    Fallback { reason: String },
}

impl SaveOutcome {
    pub fn is_encrypted(&self) -> bool {
        matches!(self, SaveOutcome::Encrypted)
    }
}

/// Why a stored value could not be authenticated and decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptFailure {
    #[error("no nonce is stored alongside the value")]
    MissingNonce,

    #[error("no key material is stored")]
    MissingKey,

    #[error("stored {record} is not valid Base64")]
    MalformedRecord { record: &'static str },

    #[error("authenticated decryption failed: {0}")]
    Rejected(String),

    #[error("decrypted bytes are not valid UTF-8")]
    NotUtf8,
}

/// A secret read back by [`CredentialGuard::retrieve`](crate::CredentialGuard::retrieve).
///
/// `Debug` output never includes the secret.
#[derive(Debug)]
pub enum Retrieved {
    /// The stored ciphertext authenticated and decrypted cleanly.
    Decrypted(SecretString),
    /// Decryption failed; `value` is the raw stored string, unchanged.
    ///
    /// This is also how a secret saved on the fallback path reads back.
    Unverified {
        value: SecretString,
        reason: DecryptFailure,
    },
}

impl Retrieved {
    /// The secret as a string, whether or not it was verified.
    pub fn expose(&self) -> &str {
        match self {
            Retrieved::Decrypted(secret) => secret.expose_secret(),
            Retrieved::Unverified { value, .. } => value.expose_secret(),
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Retrieved::Decrypted(_))
    }

    /// The reason decryption failed, if it did.
    pub fn failure(&self) -> Option<&DecryptFailure> {
        match self {
            Retrieved::Decrypted(_) => None,
            Retrieved::Unverified { reason, .. } => Some(reason),
        }
    }

    pub fn into_secret(self) -> SecretString {
        match self {
            Retrieved::Decrypted(secret) => secret,
            Retrieved::Unverified { value, .. } => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secret() {
        let retrieved =
            Retrieved::Decrypted(SecretString::from("sk-very-secret-value".to_string()));
        let debug = format!("{retrieved:?}");
        assert!(!debug.contains("sk-very-secret-value"));

        let unverified = Retrieved::Unverified {
            value: SecretString::from("raw-stored-text".to_string()),
            reason: DecryptFailure::MissingNonce,
        };
        let debug = format!("{unverified:?}");
        assert!(!debug.contains("raw-stored-text"));
        assert!(debug.contains("MissingNonce"));
    }

    #[test]
    fn accessors_distinguish_paths() {
        let ok = Retrieved::Decrypted(SecretString::from("a".to_string()));
        assert!(ok.is_verified());
        assert!(ok.failure().is_none());
        assert_eq!(ok.expose(), "a");

        let degraded = Retrieved::Unverified {
            value: SecretString::from("b".to_string()),
            reason: DecryptFailure::NotUtf8,
        };
        assert!(!degraded.is_verified());
        assert_eq!(degraded.failure(), Some(&DecryptFailure::NotUtf8));
        assert_eq!(degraded.into_secret().expose_secret(), "b");
    }

    #[test]
    fn failure_messages_name_the_problem() {
        let malformed = DecryptFailure::MalformedRecord { record: "nonce" };
        assert_eq!(malformed.to_string(), "stored nonce is not valid Base64");
        assert!(SaveOutcome::Encrypted.is_encrypted());
        assert!(!SaveOutcome::Fallback { reason: "x".into() }.is_encrypted());
    }
}
