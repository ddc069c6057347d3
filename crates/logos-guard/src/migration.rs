// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Import of a plaintext secret left behind by older releases.
//!
//! Older releases kept the API secret verbatim under a single record
//! (`openai_api_key` by default). On startup the value is moved into the
//! guard and the plaintext record is deleted.

use logos_config::model::GuardConfig;
use logos_core::LogosError;
use tracing::{debug, info, warn};

use crate::guard::CredentialGuard;
use crate::outcome::SaveOutcome;
use crate::records;

/// Report of what the migration did.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// The legacy value was saved through the guard.
    pub migrated: bool,
    /// A guarded secret already existed; the legacy value was discarded.
    pub skipped: bool,
    /// How the migrated value was saved, if it was.
    pub outcome: Option<SaveOutcome>,
    /// Non-fatal warnings (e.g., the save fell back to plaintext).
    pub warnings: Vec<String>,
}

/// Move the plaintext secret under `legacy_record` into `guard`.
///
/// The guarded secret wins when both exist. The legacy record is removed in
/// every case except when it is absent.
pub async fn migrate_legacy_secret(
    guard: &CredentialGuard,
    legacy_record: &str,
) -> Result<MigrationReport, LogosError> {
    if records::is_reserved(legacy_record) {
        return Err(LogosError::Guard(format!(
            "legacy record name `{legacy_record}` collides with a credential guard record"
        )));
    }

    let mut report = MigrationReport::default();
    let store = guard.store();

    let Some(value) = store.get(legacy_record).await? else {
        debug!(record = legacy_record, "no legacy plaintext secret found -- nothing to migrate");
        return Ok(report);
    };

    if value.trim().is_empty() {
        store.remove(legacy_record).await?;
        debug!(record = legacy_record, "removed empty legacy record");
        return Ok(report);
    }

    if guard.has_stored().await? {
        store.remove(legacy_record).await?;
        report.skipped = true;
        info!(
            record = legacy_record,
            "secret already guarded -- discarded legacy plaintext copy"
        );
        return Ok(report);
    }

    let outcome = guard.save(&value).await?;
    if let SaveOutcome::Fallback { reason } = &outcome {
        report.warnings.push(format!(
            "legacy secret migrated without encryption: {reason}"
        ));
    }
    store.remove(legacy_record).await?;
    report.migrated = true;
    report.outcome = Some(outcome);
    warn!(
        record = legacy_record,
        "migrated legacy plaintext secret into the credential guard"
    );

    Ok(report)
}

/// Run the legacy migration if `config` enables it.
pub async fn startup_check(
    guard: &CredentialGuard,
    config: &GuardConfig,
) -> Result<MigrationReport, LogosError> {
    if !config.migrate_legacy {
        debug!("legacy migration disabled");
        return Ok(MigrationReport::default());
    }
    migrate_legacy_secret(guard, &config.legacy_record).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use logos_core::LocalStore;
    use logos_storage::MemoryStore;
    use logos_test_utils::BrokenCipher;

    use super::*;

    fn guard_over(store: &Arc<MemoryStore>) -> CredentialGuard {
        CredentialGuard::new(store.clone())
    }

    #[tokio::test]
    async fn migrates_and_removes_plaintext_record() {
        let store = Arc::new(MemoryStore::with_records([("openai_api_key", "sk-legacy-1234")]));
        let guard = guard_over(&store);

        let report = migrate_legacy_secret(&guard, "openai_api_key").await.unwrap();
        assert!(report.migrated);
        assert!(!report.skipped);
        assert_eq!(report.outcome, Some(SaveOutcome::Encrypted));
        assert!(report.warnings.is_empty());

        assert!(store.get("openai_api_key").await.unwrap().is_none());
        let retrieved = guard.retrieve().await.unwrap().unwrap();
        assert!(retrieved.is_verified());
        assert_eq!(retrieved.expose(), "sk-legacy-1234");
    }

    #[tokio::test]
    async fn guarded_secret_wins_over_legacy_copy() {
        let store = Arc::new(MemoryStore::new());
        let guard = guard_over(&store);
        guard.save("sk-current-value").await.unwrap();
        store.set("openai_api_key", "sk-stale-value").await.unwrap();

        let report = migrate_legacy_secret(&guard, "openai_api_key").await.unwrap();
        assert!(report.skipped);
        assert!(!report.migrated);
        assert!(report.outcome.is_none());

        assert!(store.get("openai_api_key").await.unwrap().is_none());
        let retrieved = guard.retrieve().await.unwrap().unwrap();
        assert_eq!(retrieved.expose(), "sk-current-value");
    }

    #[tokio::test]
    async fn absent_legacy_record_is_a_no_op() {
        let store = Arc::new(MemoryStore::new());
        let guard = guard_over(&store);

        let report = migrate_legacy_secret(&guard, "openai_api_key").await.unwrap();
        assert!(!report.migrated && !report.skipped);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn empty_legacy_record_is_removed_without_saving() {
        let store = Arc::new(MemoryStore::with_records([("openai_api_key", "  ")]));
        let guard = guard_over(&store);

        let report = migrate_legacy_secret(&guard, "openai_api_key").await.unwrap();
        assert!(!report.migrated);
        assert!(store.is_empty().await);
        assert!(!guard.has_stored().await.unwrap());
    }

    #[tokio::test]
    async fn reserved_name_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let guard = guard_over(&store);

        let err = migrate_legacy_secret(&guard, "secret-ciphertext")
            .await
            .unwrap_err();
        assert!(matches!(err, LogosError::Guard(_)));
    }

    #[tokio::test]
    async fn fallback_migration_is_reported_as_a_warning() {
        let store = Arc::new(MemoryStore::with_records([("openai_api_key", "sk-legacy-1234")]));
        let guard =
            CredentialGuard::with_cipher(store.clone(), Arc::new(BrokenCipher::unavailable()));

        let report = migrate_legacy_secret(&guard, "openai_api_key").await.unwrap();
        assert!(report.migrated);
        assert!(matches!(report.outcome, Some(SaveOutcome::Fallback { .. })));
        assert_eq!(report.warnings.len(), 1);
        assert!(store.get("openai_api_key").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn startup_check_respects_the_switch() {
        let store = Arc::new(MemoryStore::with_records([("old_key", "sk-legacy-5678")]));
        let guard = guard_over(&store);

        let disabled = GuardConfig {
            migrate_legacy: false,
            legacy_record: "old_key".to_string(),
        };
        let report = startup_check(&guard, &disabled).await.unwrap();
        assert!(!report.migrated);
        assert!(store.get("old_key").await.unwrap().is_some());

        let enabled = GuardConfig {
            migrate_legacy: true,
            ..disabled
        };
        let report = startup_check(&guard, &enabled).await.unwrap();
        assert!(report.migrated);
        assert_eq!(
            guard.retrieve().await.unwrap().unwrap().expose(),
            "sk-legacy-5678"
        );
    }
}
