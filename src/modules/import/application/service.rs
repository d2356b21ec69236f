use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::catalog::domain::repositories::CatalogStore;
use crate::modules::import::domain::engine::BatchImportEngine;
use crate::modules::import::domain::stream::ImportProgressStream;
use crate::modules::import::domain::types::ImportRequest;
use crate::shared::errors::AppResult;
use crate::shared::utils::concurrency::BatchRunner;
use crate::shared::utils::validation::Validator;

/// Pre-check lookups run concurrently in small groups.
const PRECHECK_BATCH_SIZE: usize = 5;

/// One incoming item's identity, as submitted to the duplicate pre-check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateProbe {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub skus: Vec<String>,
}

/// A conflict surfaced by the pre-check, annotated with the existing item's
/// identity and the key that matched.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateMatch {
    /// "handle" or "sku"
    pub matched_field: String,
    pub matched_value: String,
    pub existing_id: Uuid,
    pub existing_handle: String,
    pub existing_title: String,
}

/// Submission surface for single-store import jobs.
pub struct ImportService {
    engine: Arc<BatchImportEngine>,
    catalog: Arc<dyn CatalogStore>,
}

impl ImportService {
    pub fn new(engine: Arc<BatchImportEngine>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { engine, catalog }
    }

    /// Validate and start an import job. Validation failures surface before
    /// any network call; the returned stream carries everything else.
    pub fn submit(&self, request: ImportRequest) -> AppResult<ImportProgressStream> {
        Validator::validate_store_url(&request.store_url)?;
        Validator::validate_page_range(request.start_page, request.end_page)?;
        if let Some(page_size) = request.page_size {
            Validator::validate_positive(page_size, "pageSize")?;
        }

        log::info!(
            "Import job accepted for {} (pages {}-{}, strategy {:?})",
            request.store_url,
            request.start_page,
            request.end_page,
            request.strategy
        );
        Ok(ImportProgressStream::spawn(Arc::clone(&self.engine), request))
    }

    /// Report which incoming items would collide with the persisted catalog,
    /// matching by handle or by any SKU.
    ///
    /// This answers "would anything conflict" for a caller up front; the
    /// import engine's own resolution stays handle-only (see DESIGN.md).
    pub async fn check_duplicates(
        &self,
        owner_id: Uuid,
        probes: Vec<DuplicateProbe>,
    ) -> AppResult<Vec<DuplicateMatch>> {
        let operations: Vec<_> = probes
            .iter()
            .map(|probe| {
                let catalog = Arc::clone(&self.catalog);
                async move {
                    let mut matches: Vec<DuplicateMatch> = Vec::new();

                    if let Some(handle) = probe.handle.as_deref() {
                        if let Some(existing) = catalog.find_by_handle(owner_id, handle).await? {
                            matches.push(DuplicateMatch {
                                matched_field: "handle".to_string(),
                                matched_value: handle.to_string(),
                                existing_id: existing.id,
                                existing_handle: existing.handle,
                                existing_title: existing.title,
                            });
                        }
                    }

                    for sku in &probe.skus {
                        if let Some(existing) = catalog.find_by_sku(owner_id, sku).await? {
                            if matches.iter().any(|m| m.existing_id == existing.id) {
                                continue;
                            }
                            matches.push(DuplicateMatch {
                                matched_field: "sku".to_string(),
                                matched_value: sku.clone(),
                                existing_id: existing.id,
                                existing_handle: existing.handle,
                                existing_title: existing.title,
                            });
                        }
                    }

                    Ok(matches)
                }
            })
            .collect();

        let outcome = BatchRunner::run_safe(operations, PRECHECK_BATCH_SIZE).await;
        for failure in &outcome.failed {
            log::warn!(
                "Duplicate pre-check lookup {} failed: {}",
                failure.index,
                failure.error
            );
        }

        Ok(outcome.succeeded.into_iter().flatten().collect())
    }
}
