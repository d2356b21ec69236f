use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::modules::catalog::domain::entities::Store;
use crate::modules::catalog::domain::repositories::CredentialCipher;
use crate::modules::import::domain::engine::BatchImportEngine;
use crate::modules::import::domain::progress::ProgressTracker;
use crate::modules::import::domain::types::{DuplicateStrategy, ImportRequest};
use crate::shared::errors::{AppError, AppResult};

use super::types::{StoreSyncResult, SyncMode, SyncOptions};

/// One store's catalog sync. Implementations are chosen per sync-all mode.
#[async_trait]
pub trait StoreSyncer: Send + Sync {
    async fn sync_store(&self, store: &Store, options: &SyncOptions) -> AppResult<StoreSyncResult>;
}

/// Syncer backed by the batch import engine.
///
/// Sync converges the local catalog on the remote state, so both variants
/// write with overwrite semantics; the modified-only sibling narrows the
/// item set to changes since the store's last sync watermark.
pub struct CatalogSyncer {
    engine: Arc<BatchImportEngine>,
    cipher: Option<Arc<dyn CredentialCipher>>,
    mode: SyncMode,
}

impl CatalogSyncer {
    pub fn full(engine: Arc<BatchImportEngine>, cipher: Option<Arc<dyn CredentialCipher>>) -> Self {
        Self {
            engine,
            cipher,
            mode: SyncMode::Full,
        }
    }

    pub fn modified_only(
        engine: Arc<BatchImportEngine>,
        cipher: Option<Arc<dyn CredentialCipher>>,
    ) -> Self {
        Self {
            engine,
            cipher,
            mode: SyncMode::ModifiedOnly,
        }
    }
}

#[async_trait]
impl StoreSyncer for CatalogSyncer {
    async fn sync_store(&self, store: &Store, options: &SyncOptions) -> AppResult<StoreSyncResult> {
        // An undecryptable credential fails this store only.
        if let (Some(cipher), Some(credential)) = (&self.cipher, &store.api_credential) {
            cipher.decrypt(credential).map_err(|e| {
                AppError::StoreSync(format!(
                    "Credential decryption failed for '{}': {}",
                    store.name, e
                ))
            })?;
        }

        let request = ImportRequest {
            store_url: store.base_url.clone(),
            start_page: 1,
            end_page: options.max_pages as i64,
            strategy: DuplicateStrategy::Overwrite,
            owner_id: store.id,
            page_size: Some(options.page_size as i64),
            modified_since: match self.mode {
                SyncMode::ModifiedOnly => store.last_synced_at,
                SyncMode::Full => None,
            },
        };

        let mut tracker = ProgressTracker::detached();
        let outcome = self
            .engine
            .run(&request, &mut tracker, &CancellationToken::new())
            .await
            .map_err(|e| AppError::StoreSync(format!("'{}': {}", store.name, e)))?;

        Ok(StoreSyncResult {
            created: outcome.created,
            updated: outcome.updated,
            skipped: outcome.skipped,
            failed: outcome.failed,
            duration_ms: outcome.duration_ms,
        })
    }
}
