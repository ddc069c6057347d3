// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AEAD primitive with switchable failures.
//!
//! `BrokenCipher` either stands in for a host with no usable primitive
//! ([`BrokenCipher::unavailable`]) or wraps a real one and fails individual
//! operations on demand ([`BrokenCipher::wrapping`]).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use logos_core::{AeadCipher, LogosError, Sealed};
use zeroize::Zeroizing;

/// Key length reported when there is no inner primitive (AES-256 sized).
const UNAVAILABLE_KEY_LEN: usize = 32;

pub struct BrokenCipher {
    inner: Option<Arc<dyn AeadCipher>>,
    fail_keygen: AtomicBool,
    fail_seal: AtomicBool,
    fail_open: AtomicBool,
}

impl BrokenCipher {
    /// A primitive that fails every operation.
    pub fn unavailable() -> Self {
        Self {
            inner: None,
            fail_keygen: AtomicBool::new(true),
            fail_seal: AtomicBool::new(true),
            fail_open: AtomicBool::new(true),
        }
    }

    /// Delegate to `inner` until a failure is switched on.
    pub fn wrapping(inner: Arc<dyn AeadCipher>) -> Self {
        Self {
            inner: Some(inner),
            fail_keygen: AtomicBool::new(false),
            fail_seal: AtomicBool::new(false),
            fail_open: AtomicBool::new(false),
        }
    }

    pub fn fail_keygen(&self, on: bool) {
        self.fail_keygen.store(on, Ordering::SeqCst);
    }

    pub fn fail_seal(&self, on: bool) {
        self.fail_seal.store(on, Ordering::SeqCst);
    }

    pub fn fail_open(&self, on: bool) {
        self.fail_open.store(on, Ordering::SeqCst);
    }

    fn delegate(&self, switch: &AtomicBool, op: &str) -> Result<&dyn AeadCipher, LogosError> {
        match &self.inner {
            Some(inner) if !switch.load(Ordering::SeqCst) => Ok(inner.as_ref()),
            _ => Err(LogosError::Crypto(format!("{op} unavailable"))),
        }
    }
}

impl AeadCipher for BrokenCipher {
    fn algorithm(&self) -> &'static str {
        match &self.inner {
            Some(inner) => inner.algorithm(),
            None => "unavailable",
        }
    }

    fn key_len(&self) -> usize {
        match &self.inner {
            Some(inner) => inner.key_len(),
            None => UNAVAILABLE_KEY_LEN,
        }
    }

    fn generate_key(&self) -> Result<Zeroizing<Vec<u8>>, LogosError> {
        self.delegate(&self.fail_keygen, "key generation")?
            .generate_key()
    }

    fn seal(&self, key: &[u8], plaintext: &[u8]) -> Result<Sealed, LogosError> {
        self.delegate(&self.fail_seal, "encryption")?
            .seal(key, plaintext)
    }

    fn open(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, LogosError> {
        self.delegate(&self.fail_open, "decryption")?
            .open(key, nonce, ciphertext)
    }
}
