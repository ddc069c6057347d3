// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential guard lifecycle: save, retrieve, clear, mask, and presence checks.
//!
//! The guard persists four records through a [`LocalStore`]:
//! - key material, generated once per profile and reused until cleared;
//! - ciphertext and nonce, rewritten together on every save;
//! - a stored-at timestamp for display.
//!
//! Saves and clears hold the write side of an async gate, reads hold the read
//! side, so overlapping calls never observe a ciphertext paired with a nonce
//! or key from a different save.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use logos_core::{AeadCipher, HealthStatus, LocalStore, LogosError, WriteBatch};
use secrecy::SecretString;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::crypto::RingCipher;
use crate::mask::mask_secret;
use crate::outcome::{DecryptFailure, Retrieved, SaveOutcome};
use crate::records;

/// Guards a single user secret in a local key/value store.
///
/// Debug output intentionally omits all record contents.
pub struct CredentialGuard {
    store: Arc<dyn LocalStore>,
    cipher: Arc<dyn AeadCipher>,
    gate: RwLock<()>,
}

impl std::fmt::Debug for CredentialGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialGuard")
            .field("store", &self.store.kind())
            .field("cipher", &self.cipher.algorithm())
            .finish()
    }
}

impl CredentialGuard {
    /// Create a guard over `store` using AES-256-GCM.
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self::with_cipher(store, Arc::new(RingCipher::new()))
    }

    /// Create a guard with an explicit AEAD primitive.
    pub fn with_cipher(store: Arc<dyn LocalStore>, cipher: Arc<dyn AeadCipher>) -> Self {
        Self {
            store,
            cipher,
            gate: RwLock::new(()),
        }
    }

    pub(crate) fn store(&self) -> &Arc<dyn LocalStore> {
        &self.store
    }

    /// Encrypt and persist `plaintext`, replacing any previously stored secret.
    ///
    /// On first use the key material is generated and written before the
    /// ciphertext. If the primitive fails, the plaintext is stored verbatim
    /// and [`SaveOutcome::Fallback`] is returned. `Err` means the store itself
    /// failed.
    pub async fn save(&self, plaintext: &str) -> Result<SaveOutcome, LogosError> {
        let _gate = self.gate.write().await;
        let stored_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        match self.seal(plaintext).await? {
            Ok((ciphertext, nonce)) => {
                self.store
                    .apply(
                        WriteBatch::new()
                            .set(records::IV, nonce)
                            .set(records::CIPHERTEXT, ciphertext)
                            .set(records::STORED_AT, stored_at),
                    )
                    .await?;
                debug!(
                    algorithm = self.cipher.algorithm(),
                    masked = %mask_secret(plaintext),
                    "secret encrypted and stored"
                );
                Ok(SaveOutcome::Encrypted)
            }
            Err(e) => {
                let reason = e.to_string();
                // The stale nonce goes with the old ciphertext it belonged to.
                self.store
                    .apply(
                        WriteBatch::new()
                            .remove(records::IV)
                            .set(records::CIPHERTEXT, plaintext)
                            .set(records::STORED_AT, stored_at),
                    )
                    .await?;
                warn!(
                    algorithm = self.cipher.algorithm(),
                    reason = %reason,
                    "encryption unavailable -- secret stored without encryption"
                );
                Ok(SaveOutcome::Fallback { reason })
            }
        }
    }

    /// Read the stored secret back.
    ///
    /// Returns `Ok(None)` when nothing is stored. A value that fails to decrypt
    /// is returned unchanged as [`Retrieved::Unverified`].
    pub async fn retrieve(&self) -> Result<Option<Retrieved>, LogosError> {
        let _gate = self.gate.read().await;

        let Some(raw) = self.store.get(records::CIPHERTEXT).await? else {
            return Ok(None);
        };
        let nonce = self.store.get(records::IV).await?;
        let key = self.store.get(records::ENCRYPTION_KEY).await?;

        match self.open(&raw, nonce.as_deref(), key.as_deref()) {
            Ok(secret) => Ok(Some(Retrieved::Decrypted(secret))),
            Err(reason) => {
                warn!(
                    reason = %reason,
                    "stored secret could not be decrypted -- returning it unverified"
                );
                Ok(Some(Retrieved::Unverified {
                    value: SecretString::from(raw),
                    reason,
                }))
            }
        }
    }

    /// Remove every record the guard owns. Calling it with nothing stored is a no-op.
    pub async fn clear(&self) -> Result<(), LogosError> {
        let _gate = self.gate.write().await;
        let batch = records::ALL
            .iter()
            .fold(WriteBatch::new(), |batch, name| batch.remove(*name));
        self.store.apply(batch).await?;
        info!("stored secret cleared");
        Ok(())
    }

    /// Mask a secret for display. See [`mask_secret`].
    pub fn mask(&self, plaintext: &str) -> String {
        mask_secret(plaintext)
    }

    /// Whether a ciphertext record exists.
    pub async fn has_stored(&self) -> Result<bool, LogosError> {
        let _gate = self.gate.read().await;
        Ok(self.store.get(records::CIPHERTEXT).await?.is_some())
    }

    /// Health of the backing store.
    pub async fn store_health(&self) -> Result<HealthStatus, LogosError> {
        self.store.health_check().await
    }

    /// When the current secret was saved, if ever.
    ///
    /// An unparseable timestamp is treated as absent.
    pub async fn stored_at(&self) -> Result<Option<DateTime<Utc>>, LogosError> {
        let _gate = self.gate.read().await;
        let Some(raw) = self.store.get(records::STORED_AT).await? else {
            return Ok(None);
        };
        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(ts) => Ok(Some(ts.with_timezone(&Utc))),
            Err(e) => {
                warn!(error = %e, "stored-at timestamp is not RFC 3339 -- ignoring it");
                Ok(None)
            }
        }
    }

    /// Seal `plaintext`, returning Base64 `(ciphertext, nonce)`.
    ///
    /// The outer `Result` carries store failures; the inner one carries
    /// primitive failures, which the caller degrades on.
    async fn seal(
        &self,
        plaintext: &str,
    ) -> Result<Result<(String, String), LogosError>, LogosError> {
        let key = match self.ensure_key().await? {
            Ok(key) => key,
            Err(e) => return Ok(Err(e)),
        };
        let sealed = match self.cipher.seal(&key, plaintext.as_bytes()) {
            Ok(sealed) => sealed,
            Err(e) => return Ok(Err(e)),
        };
        Ok(Ok((
            records::encode(&sealed.ciphertext),
            records::encode(&sealed.nonce),
        )))
    }

    /// Load the persisted key material, generating and persisting it if absent.
    async fn ensure_key(
        &self,
    ) -> Result<Result<Zeroizing<Vec<u8>>, LogosError>, LogosError> {
        if let Some(encoded) = self.store.get(records::ENCRYPTION_KEY).await? {
            match records::decode(&encoded) {
                Ok(key) if key.len() == self.cipher.key_len() => return Ok(Ok(key)),
                Ok(key) => {
                    warn!(
                        expected = self.cipher.key_len(),
                        actual = key.len(),
                        "stored key material has the wrong length -- generating a new key"
                    );
                }
                Err(e) => {
                    warn!(error = %e, "stored key material is corrupted -- generating a new key");
                }
            }
        }

        let key = match self.cipher.generate_key() {
            Ok(key) => key,
            Err(e) => return Ok(Err(e)),
        };
        self.store
            .set(records::ENCRYPTION_KEY, &records::encode(&key))
            .await?;
        info!(algorithm = self.cipher.algorithm(), "generated new key material");
        Ok(Ok(key))
    }

    fn open(
        &self,
        raw: &str,
        nonce: Option<&str>,
        key: Option<&str>,
    ) -> Result<SecretString, DecryptFailure> {
        let nonce = nonce.ok_or(DecryptFailure::MissingNonce)?;
        let key = key.ok_or(DecryptFailure::MissingKey)?;

        let ciphertext = records::decode(raw)
            .map_err(|_| DecryptFailure::MalformedRecord { record: "ciphertext" })?;
        let nonce = records::decode(nonce)
            .map_err(|_| DecryptFailure::MalformedRecord { record: "nonce" })?;
        let key = records::decode(key)
            .map_err(|_| DecryptFailure::MalformedRecord { record: "key material" })?;

        let plaintext = self
            .cipher
            .open(&key, &nonce, &ciphertext)
            .map_err(|e| DecryptFailure::Rejected(e.to_string()))?;
        let text = String::from_utf8(plaintext.to_vec()).map_err(|_| DecryptFailure::NotUtf8)?;
        Ok(SecretString::from(text))
    }
}
