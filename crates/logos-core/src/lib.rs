// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Logos credential guard.
//!
//! This crate provides the error type, the seam traits between the guard and
//! its environment (a local key/value store and an AEAD primitive), and the
//! small value types those traits exchange.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LogosError;
pub use traits::{AeadCipher, LocalStore, Sealed};
pub use types::{HealthStatus, StoreKind, StoreOp, WriteBatch};

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct PlainMap {
        inner: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl LocalStore for PlainMap {
        fn kind(&self) -> StoreKind {
            StoreKind::Memory
        }

        async fn get(&self, key: &str) -> Result<Option<String>, LogosError> {
            Ok(self.inner.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), LogosError> {
            self.inner
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), LogosError> {
            self.inner.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[test]
    fn logos_error_has_all_variants() {
        let _config = LogosError::Config("test".into());
        let _storage = LogosError::storage(std::io::Error::other("test"));
        let _crypto = LogosError::Crypto("test".into());
        let _guard = LogosError::Guard("test".into());
        let _internal = LogosError::Internal("test".into());
    }

    #[test]
    fn storage_error_display_includes_source() {
        let err = LogosError::storage("disk full");
        assert_eq!(err.to_string(), "storage error: disk full");
    }

    #[test]
    fn store_kind_round_trips_through_strings() {
        for kind in [StoreKind::Memory, StoreKind::Sqlite] {
            let s = kind.to_string();
            assert_eq!(StoreKind::from_str(&s).unwrap(), kind);
        }
        assert_eq!(StoreKind::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn health_status_labels_and_details() {
        assert_eq!(HealthStatus::Healthy.as_str(), "healthy");
        assert_eq!(HealthStatus::Healthy.detail(), None);
        let degraded = HealthStatus::Degraded("page 3 corrupt".into());
        assert_eq!(degraded.as_str(), "degraded");
        assert_eq!(degraded.detail(), Some("page 3 corrupt"));
        assert_eq!(HealthStatus::Unhealthy("gone".into()).as_str(), "unhealthy");
    }

    #[test]
    fn write_batch_preserves_order() {
        let batch = WriteBatch::new().set("a", "1").remove("b").set("c", "3");
        let keys: Vec<&str> = batch.ops().iter().map(StoreOp::key).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(batch.len(), 3);
        assert!(!batch.is_empty());
        assert!(WriteBatch::new().is_empty());
    }

    #[tokio::test]
    async fn default_apply_runs_every_operation() {
        let store = PlainMap::default();
        store.set("stale", "x").await.unwrap();

        store
            .apply(WriteBatch::new().set("a", "1").set("a", "2").remove("stale"))
            .await
            .unwrap();

        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("2"));
        assert_eq!(store.get("stale").await.unwrap(), None);
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[test]
    fn sealed_debug_hides_bytes() {
        let sealed = Sealed {
            ciphertext: vec![0xAB; 20],
            nonce: vec![0xCD; 12],
        };
        let debug = format!("{sealed:?}");
        assert!(debug.contains("ciphertext_len: 20"));
        assert!(!debug.contains("171"));
    }
}
