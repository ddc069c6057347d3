// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Symmetric authenticated-encryption seam.

use zeroize::Zeroizing;

use crate::error::LogosError;

/// Output of [`AeadCipher::seal`]: ciphertext (tag appended) and the nonce used.
#[derive(Clone, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
}

impl std::fmt::Debug for Sealed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sealed")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("nonce_len", &self.nonce.len())
            .finish()
    }
}

/// A symmetric AEAD primitive together with its source of random bytes.
///
/// Implementations must draw a fresh nonce from a cryptographically strong
/// source on every call to [`seal`](AeadCipher::seal).
pub trait AeadCipher: Send + Sync + 'static {
    /// Human-readable algorithm name, used in log fields.
    fn algorithm(&self) -> &'static str;

    /// Length in bytes of the key material this primitive accepts.
    fn key_len(&self) -> usize;

    /// Generate new random key material of [`key_len`](AeadCipher::key_len) bytes.
    fn generate_key(&self) -> Result<Zeroizing<Vec<u8>>, LogosError>;

    /// Encrypt `plaintext` under `key` with a fresh random nonce.
    fn seal(&self, key: &[u8], plaintext: &[u8]) -> Result<Sealed, LogosError>;

    /// Decrypt and authenticate `ciphertext`.
    fn open(&self, key: &[u8], nonce: &[u8], ciphertext: &[u8])
        -> Result<Zeroizing<Vec<u8>>, LogosError>;
}
