use chrono::Utc;
use std::sync::Arc;

use crate::{log_info, log_warn};

use crate::modules::catalog::domain::entities::StoreFilter;
use crate::modules::catalog::domain::repositories::StoreDirectory;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;

use super::syncer::StoreSyncer;
use super::types::{StoreSyncOutcome, SyncMode, SyncReport, SyncRequest, SyncSummary};

/// Runs a named sync operation against every store matching a selection
/// filter, isolating failures per store: one bad store never blocks the
/// others.
pub struct MultiStoreSyncOrchestrator {
    directory: Arc<dyn StoreDirectory>,
    full_syncer: Arc<dyn StoreSyncer>,
    modified_syncer: Arc<dyn StoreSyncer>,
}

impl MultiStoreSyncOrchestrator {
    pub fn new(
        directory: Arc<dyn StoreDirectory>,
        full_syncer: Arc<dyn StoreSyncer>,
        modified_syncer: Arc<dyn StoreSyncer>,
    ) -> Self {
        Self {
            directory,
            full_syncer,
            modified_syncer,
        }
    }

    /// Sync every matching store, sequentially, and aggregate the outcomes.
    ///
    /// Stores run one at a time so each store's own rate-limit delays finish
    /// before the next store starts; outcome order matches store resolution
    /// order. Only request validation fails the whole call.
    pub async fn sync_all(
        &self,
        filter: &StoreFilter,
        request: &SyncRequest,
    ) -> AppResult<SyncReport> {
        // Validation happens before any store is contacted.
        let options = request.validate()?;
        let mode = request.mode();

        let stores = self.directory.list_stores(filter).await?;
        log_info!(
            "Sync-all starting: {} target stores ({:?} mode, page size {}, max pages {})",
            stores.len(),
            mode,
            options.page_size,
            options.max_pages
        );

        let syncer = match mode {
            SyncMode::Full => &self.full_syncer,
            SyncMode::ModifiedOnly => &self.modified_syncer,
        };

        let mut outcomes = Vec::with_capacity(stores.len());
        for store in &stores {
            LogContext::store_sync(&store.name, "starting", None);

            let outcome = match syncer.sync_store(store, &options).await {
                Ok(result) => {
                    LogContext::store_sync(&store.name, "completed", Some(result.duration_ms));
                    if let Err(e) = self.directory.mark_synced(store.id, Utc::now()).await {
                        log_warn!("Could not record sync time for '{}': {}", store.name, e);
                    }
                    StoreSyncOutcome {
                        store_id: store.id,
                        store_name: store.name.clone(),
                        success: true,
                        result: Some(result),
                        error: None,
                    }
                }
                Err(e) => {
                    // The central failure-isolation guarantee: the error is
                    // captured into this store's outcome and iteration
                    // continues.
                    log_warn!("Sync failed for store '{}': {}", store.name, e);
                    StoreSyncOutcome {
                        store_id: store.id,
                        store_name: store.name.clone(),
                        success: false,
                        result: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        let summary = SyncSummary::from_outcomes(&outcomes);
        log_info!(
            "Sync-all finished: {}/{} stores succeeded, {} products created",
            summary.successful_stores,
            summary.total_stores,
            summary.total_products
        );

        Ok(SyncReport { outcomes, summary })
    }
}
