use crate::log_warn;
use std::sync::Arc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::modules::catalog::domain::entities::{CatalogItem, NewCatalogItem, NewVariant};
use crate::modules::catalog::domain::repositories::{CatalogStore, ImageArchiver};
use crate::modules::platform::traits::PlatformClient;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::TimedOperation;

use super::progress::ProgressTracker;
use super::resolver::{DuplicateResolver, Resolution};
use super::types::{ImportConfig, ImportOutcome, ImportRequest};

enum ItemDisposition {
    Created,
    Updated,
    Skipped,
}

/// Drives the fetch, resolve, and persist loop for one store.
///
/// One logical worker per job: items inside a batch are processed
/// sequentially, and the inter-batch delay is a task-local suspension that
/// never stalls other jobs.
pub struct BatchImportEngine {
    platform: Arc<dyn PlatformClient>,
    catalog: Arc<dyn CatalogStore>,
    images: Arc<dyn ImageArchiver>,
    config: ImportConfig,
}

impl BatchImportEngine {
    pub fn new(
        platform: Arc<dyn PlatformClient>,
        catalog: Arc<dyn CatalogStore>,
        images: Arc<dyn ImageArchiver>,
        config: ImportConfig,
    ) -> Self {
        Self {
            platform,
            catalog,
            images,
            config,
        }
    }

    /// Run one import job to completion.
    ///
    /// Page-level and item-level failures are absorbed into the progress
    /// record; only an incompatible store fails the job, and it does so
    /// before any partial progress is produced.
    pub async fn run(
        &self,
        request: &ImportRequest,
        tracker: &mut ProgressTracker,
        cancel: &CancellationToken,
    ) -> AppResult<ImportOutcome> {
        let timer = TimedOperation::new("catalog_import");

        // Verifying
        if !self.platform.verify_compatible(&request.store_url).await {
            return Err(AppError::IncompatibleStore(format!(
                "{} is not a recognizable {} catalog",
                request.store_url,
                self.platform.platform()
            )));
        }
        tracker.log(format!(
            "Verified {} as a {} catalog",
            request.store_url,
            self.platform.platform()
        ));

        let items = self.fetch_catalog(request, tracker, cancel).await;
        tracker.set_total(items.len());

        // Importing / Waiting
        let batch_size = self.config.batch_size.max(1);
        let batch_count = items.len().div_ceil(batch_size);
        'batches: for (batch_index, batch) in items.chunks(batch_size).enumerate() {
            for item in batch {
                if cancel.is_cancelled() {
                    tracker.log("Import cancelled, stopping before next item".to_string());
                    break 'batches;
                }

                tracker.begin_item(&item.title);
                match self.import_item(item, request).await {
                    Ok(ItemDisposition::Created) => tracker.record_created(),
                    Ok(ItemDisposition::Updated) => tracker.record_updated(),
                    Ok(ItemDisposition::Skipped) => tracker.record_skipped(format!(
                        "Skipped '{}': handle already imported",
                        item.title
                    )),
                    Err(e) => {
                        tracker.record_failed(format!("Failed to import '{}': {}", item.title, e))
                    }
                }
            }

            // Deliberate rate limit against the remote platform; local to
            // this job's task.
            if batch_index + 1 < batch_count {
                tracker.log(format!(
                    "Batch {}/{} done, waiting {}s before next batch",
                    batch_index + 1,
                    batch_count,
                    self.config.batch_delay.as_secs()
                ));
                tokio::select! {
                    _ = sleep(self.config.batch_delay) => {}
                    _ = cancel.cancelled() => {
                        tracker.log("Import cancelled during batch delay".to_string());
                        break 'batches;
                    }
                }
            }
        }

        // Completed
        let duration_ms = timer.finish();
        let outcome = tracker.outcome(duration_ms);
        tracker.log(format!(
            "Import finished: {} imported, {} failed, {} skipped of {} total",
            outcome.success, outcome.failed, outcome.skipped, outcome.total
        ));
        Ok(outcome)
    }

    /// Fetch all requested pages up front. A page error is logged and
    /// fetching continues; an empty page means the remote catalog is
    /// exhausted and ends pagination early.
    async fn fetch_catalog(
        &self,
        request: &ImportRequest,
        tracker: &mut ProgressTracker,
        cancel: &CancellationToken,
    ) -> Vec<CatalogItem> {
        let page_size = request
            .page_size
            .map(|size| size as u32)
            .unwrap_or(self.config.page_size);

        let mut items = Vec::new();
        for page in request.start_page..=request.end_page {
            if cancel.is_cancelled() {
                tracker.log("Import cancelled during catalog fetch".to_string());
                break;
            }

            match self
                .platform
                .fetch_page(&request.store_url, page as u32, page_size)
                .await
            {
                Ok(page_items) if page_items.is_empty() => {
                    tracker.log(format!("Page {} is empty, remote catalog exhausted", page));
                    break;
                }
                Ok(page_items) => {
                    tracker.log(format!("Fetched {} items from page {}", page_items.len(), page));
                    items.extend(page_items);
                }
                Err(e) => {
                    // Page-level failures are non-fatal to the job
                    tracker.log(format!("Page {} fetch failed: {}", page, e));
                }
            }
        }

        if let Some(since) = request.modified_since {
            let fetched = items.len();
            items.retain(|item| item.updated_at.map_or(true, |at| at > since));
            tracker.log(format!(
                "{} of {} items modified since {}",
                items.len(),
                fetched,
                since.to_rfc3339()
            ));
        }

        items
    }

    async fn import_item(
        &self,
        item: &CatalogItem,
        request: &ImportRequest,
    ) -> AppResult<ItemDisposition> {
        // A partial image set is acceptable; archival failure never fails
        // the item.
        let image_paths = match self
            .images
            .download_images(&item.images, request.owner_id, self.config.image_delay_ms)
            .await
        {
            Ok(paths) => paths,
            Err(e) => {
                log_warn!("Image archival failed for '{}': {}", item.title, e);
                Vec::new()
            }
        };

        let existing = match item.handle.as_deref() {
            Some(handle) => self.catalog.find_by_handle(request.owner_id, handle).await?,
            None => None,
        };

        match DuplicateResolver::resolve(item, existing.as_ref(), request.strategy) {
            Resolution::Skip => Ok(ItemDisposition::Skipped),
            Resolution::Overwrite { existing_id } => {
                self.catalog.delete_variants(existing_id).await?;
                let record = Self::to_record(item, request, image_paths, None, None);
                let stored = self.catalog.update_item(existing_id, &record).await?;
                self.insert_variants(stored.id, item).await?;
                Ok(ItemDisposition::Updated)
            }
            Resolution::Create { handle, title } => {
                let record = Self::to_record(item, request, image_paths, handle, title);
                let stored = self.catalog.create_item(&record).await?;
                self.insert_variants(stored.id, item).await?;
                Ok(ItemDisposition::Created)
            }
        }
    }

    async fn insert_variants(&self, item_id: uuid::Uuid, item: &CatalogItem) -> AppResult<()> {
        let variants: Vec<NewVariant> = item.variants.iter().map(NewVariant::from_remote).collect();
        if !variants.is_empty() {
            self.catalog.insert_variants(item_id, &variants).await?;
        }
        Ok(())
    }

    fn to_record(
        item: &CatalogItem,
        request: &ImportRequest,
        image_paths: Vec<String>,
        handle_override: Option<String>,
        title_override: Option<String>,
    ) -> NewCatalogItem {
        let handle = handle_override
            .or_else(|| item.handle.clone())
            .unwrap_or_else(|| format!("item-{}", item.remote_id));
        NewCatalogItem {
            owner_id: request.owner_id,
            handle,
            title: title_override.unwrap_or_else(|| item.title.clone()),
            body_html: item.body_html.clone(),
            vendor: item.vendor.clone(),
            tags: item.tags.clone(),
            image_paths,
        }
    }
}
