/// Hand-rolled collaborator fakes for engine and orchestrator tests
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use storesync::modules::catalog::{
    CatalogItem, CatalogStore, ImageArchiver, MemoryCatalogStore, NewCatalogItem, NewVariant,
    Store, StoredItem,
};
use storesync::modules::platform::{Platform, PlatformClient};
use storesync::modules::sync::{StoreSyncResult, StoreSyncer, SyncOptions, StoreSyncOutcome};
use storesync::{AppError, AppResult};

/// Platform client serving scripted pages instead of the network.
pub struct ScriptedPlatformClient {
    compatible: bool,
    pages: Vec<Result<Vec<CatalogItem>, String>>,
    fetch_calls: AtomicUsize,
}

impl ScriptedPlatformClient {
    pub fn new(pages: Vec<Result<Vec<CatalogItem>, String>>) -> Self {
        Self {
            compatible: true,
            pages,
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn single_page(items: Vec<CatalogItem>) -> Self {
        Self::new(vec![Ok(items)])
    }

    pub fn incompatible() -> Self {
        Self {
            compatible: false,
            pages: Vec::new(),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlatformClient for ScriptedPlatformClient {
    fn platform(&self) -> Platform {
        Platform::Shopify
    }

    async fn verify_compatible(&self, _base_url: &str) -> bool {
        self.compatible
    }

    async fn fetch_page(
        &self,
        _base_url: &str,
        page: u32,
        _page_size: u32,
    ) -> AppResult<Vec<CatalogItem>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match self.pages.get((page as usize).saturating_sub(1)) {
            Some(Ok(items)) => Ok(items.clone()),
            Some(Err(message)) => Err(AppError::RemoteFetch(message.clone())),
            None => Ok(Vec::new()),
        }
    }
}

/// Archiver fabricating local paths without touching the filesystem.
pub struct NullArchiver;

#[async_trait]
impl ImageArchiver for NullArchiver {
    async fn download_images(
        &self,
        urls: &[String],
        owner_id: Uuid,
        _delay_ms: u64,
    ) -> AppResult<Vec<String>> {
        Ok(urls
            .iter()
            .enumerate()
            .map(|(index, _)| format!("/images/{}/{}.png", owner_id, index))
            .collect())
    }
}

/// Archiver whose every call fails, for partial-image-set behavior.
pub struct BrokenArchiver;

#[async_trait]
impl ImageArchiver for BrokenArchiver {
    async fn download_images(
        &self,
        _urls: &[String],
        _owner_id: Uuid,
        _delay_ms: u64,
    ) -> AppResult<Vec<String>> {
        Err(AppError::ExternalService("image host unreachable".to_string()))
    }
}

/// Catalog store that fails writes for one poisoned handle and delegates
/// everything else to a memory store.
pub struct FailingHandleStore {
    inner: Arc<MemoryCatalogStore>,
    poison_handle: String,
}

impl FailingHandleStore {
    pub fn new(inner: Arc<MemoryCatalogStore>, poison_handle: &str) -> Self {
        Self {
            inner,
            poison_handle: poison_handle.to_string(),
        }
    }
}

#[async_trait]
impl CatalogStore for FailingHandleStore {
    async fn find_by_handle(&self, owner_id: Uuid, handle: &str) -> AppResult<Option<StoredItem>> {
        self.inner.find_by_handle(owner_id, handle).await
    }

    async fn find_by_sku(&self, owner_id: Uuid, sku: &str) -> AppResult<Option<StoredItem>> {
        self.inner.find_by_sku(owner_id, sku).await
    }

    async fn create_item(&self, item: &NewCatalogItem) -> AppResult<StoredItem> {
        if item.handle == self.poison_handle {
            return Err(AppError::Storage("injected write failure".to_string()));
        }
        self.inner.create_item(item).await
    }

    async fn update_item(&self, item_id: Uuid, item: &NewCatalogItem) -> AppResult<StoredItem> {
        self.inner.update_item(item_id, item).await
    }

    async fn delete_variants(&self, item_id: Uuid) -> AppResult<usize> {
        self.inner.delete_variants(item_id).await
    }

    async fn insert_variants(&self, item_id: Uuid, variants: &[NewVariant]) -> AppResult<usize> {
        self.inner.insert_variants(item_id, variants).await
    }
}

/// Syncer returning canned per-store results, keyed by store name.
pub struct ScriptedSyncer {
    results: HashMap<String, Result<usize, String>>,
    calls: AtomicUsize,
}

impl ScriptedSyncer {
    pub fn new(results: HashMap<String, Result<usize, String>>) -> Self {
        Self {
            results,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreSyncer for ScriptedSyncer {
    async fn sync_store(&self, store: &Store, _options: &SyncOptions) -> AppResult<StoreSyncResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.results.get(&store.name) {
            Some(Ok(created)) => Ok(StoreSyncResult {
                created: *created,
                updated: 0,
                skipped: 0,
                failed: 0,
                duration_ms: 5,
            }),
            Some(Err(message)) => Err(AppError::StoreSync(message.clone())),
            None => Err(AppError::StoreSync(format!(
                "no scripted result for '{}'",
                store.name
            ))),
        }
    }
}

/// Ordered store names from a sync report, for asserting outcome order.
pub fn outcome_names(outcomes: &[StoreSyncOutcome]) -> Vec<&str> {
    outcomes
        .iter()
        .map(|outcome| outcome.store_name.as_str())
        .collect()
}
