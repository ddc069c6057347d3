// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM implementation of [`AeadCipher`] on top of `ring`.
//!
//! Every call to [`seal`](AeadCipher::seal) draws a fresh random 96-bit nonce
//! from the system CSPRNG. Nonce reuse under one key would be catastrophic
//! for GCM.

use logos_core::{AeadCipher, LogosError, Sealed};
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES-256-GCM with nonces and keys from [`SystemRandom`].
#[derive(Clone)]
pub struct RingCipher {
    rng: SystemRandom,
}

impl std::fmt::Debug for RingCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingCipher")
            .field("algorithm", &self.algorithm())
            .finish()
    }
}

impl Default for RingCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl RingCipher {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    fn key(key: &[u8]) -> Result<LessSafeKey, LogosError> {
        let unbound = UnboundKey::new(&AES_256_GCM, key).map_err(|_| {
            LogosError::Crypto(format!(
                "invalid AES-256-GCM key length: expected {KEY_LEN} bytes, got {}",
                key.len()
            ))
        })?;
        Ok(LessSafeKey::new(unbound))
    }
}

impl AeadCipher for RingCipher {
    fn algorithm(&self) -> &'static str {
        "AES-256-GCM"
    }

    fn key_len(&self) -> usize {
        KEY_LEN
    }

    fn generate_key(&self) -> Result<Zeroizing<Vec<u8>>, LogosError> {
        let mut key = Zeroizing::new(vec![0u8; KEY_LEN]);
        self.rng
            .fill(key.as_mut_slice())
            .map_err(|_| LogosError::Crypto("failed to generate random key".to_string()))?;
        Ok(key)
    }

    fn seal(&self, key: &[u8], plaintext: &[u8]) -> Result<Sealed, LogosError> {
        let less_safe = Self::key(key)?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| LogosError::Crypto("failed to generate random nonce".to_string()))?;
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        // The buffer is extended in place with the 16-byte authentication tag.
        let mut in_out = plaintext.to_vec();
        less_safe
            .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| LogosError::Crypto("AES-256-GCM encryption failed".to_string()))?;

        Ok(Sealed {
            ciphertext: in_out,
            nonce: nonce_bytes.to_vec(),
        })
    }

    fn open(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, LogosError> {
        let less_safe = Self::key(key)?;
        let nonce = Nonce::try_assume_unique_for_key(nonce).map_err(|_| {
            LogosError::Crypto(format!(
                "invalid nonce length: expected {NONCE_LEN} bytes, got {}",
                nonce.len()
            ))
        })?;

        let mut in_out = Zeroizing::new(ciphertext.to_vec());
        let plaintext_len = less_safe
            .open_in_place(nonce, Aad::empty(), in_out.as_mut_slice())
            .map_err(|_| {
                LogosError::Crypto(
                    "AES-256-GCM decryption failed -- wrong key or corrupted data".to_string(),
                )
            })?
            .len();
        in_out.truncate(plaintext_len);
        Ok(in_out)
    }
}
