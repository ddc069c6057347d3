// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Names and encoding of the records the guard persists.
//!
//! These four names are the on-disk format. Nothing outside this crate reads
//! them; hosts go through [`CredentialGuard`](crate::CredentialGuard).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroizing;

/// Base64 ciphertext (tag appended), or the plaintext on the fallback path.
pub(crate) const CIPHERTEXT: &str = "secret-ciphertext";
/// Base64 raw key bytes.
pub(crate) const ENCRYPTION_KEY: &str = "secret-encryption-key";
/// Base64 nonce paired with the current ciphertext.
pub(crate) const IV: &str = "secret-iv";
/// RFC 3339 timestamp of the last save.
pub(crate) const STORED_AT: &str = "secret-stored-at";

pub(crate) const ALL: [&str; 4] = [CIPHERTEXT, ENCRYPTION_KEY, IV, STORED_AT];

/// Whether `name` collides with a record owned by the guard.
pub fn is_reserved(name: &str) -> bool {
    ALL.contains(&name)
}

pub(crate) fn encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

pub(crate) fn decode(value: &str) -> Result<Zeroizing<Vec<u8>>, base64::DecodeError> {
    BASE64.decode(value.trim()).map(Zeroizing::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names_cover_every_record() {
        let names = [
            "secret-ciphertext",
            "secret-encryption-key",
            "secret-iv",
            "secret-stored-at",
        ];
        for name in names {
            assert!(is_reserved(name), "{name} should be reserved");
        }
        assert!(!is_reserved("openai_api_key"));
    }

    #[test]
    fn decode_tolerates_surrounding_whitespace() {
        let encoded = format!(" {}\n", encode(b"nonce-bytes!"));
        assert_eq!(decode(&encoded).unwrap().as_slice(), b"nonce-bytes!");
    }

    #[test]
    fn decode_rejects_non_base64() {
        assert!(decode("not base64 at all!").is_err());
    }
}
