use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::entities::{NewCatalogItem, NewVariant, Store, StoreFilter, StoredItem};
use crate::shared::errors::AppResult;

/// Persisted catalog access. The admin application backs this with its own
/// database mapping; this crate only depends on the seam.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_by_handle(&self, owner_id: Uuid, handle: &str) -> AppResult<Option<StoredItem>>;

    async fn find_by_sku(&self, owner_id: Uuid, sku: &str) -> AppResult<Option<StoredItem>>;

    /// Insert a new item. Fails with `AppError::Storage` on a handle
    /// uniqueness violation.
    async fn create_item(&self, item: &NewCatalogItem) -> AppResult<StoredItem>;

    async fn update_item(&self, item_id: Uuid, item: &NewCatalogItem) -> AppResult<StoredItem>;

    /// Purge an item's variant set. Returns the number of variants removed.
    async fn delete_variants(&self, item_id: Uuid) -> AppResult<usize>;

    /// Bulk-insert variants for an item. Returns the number inserted.
    async fn insert_variants(&self, item_id: Uuid, variants: &[NewVariant]) -> AppResult<usize>;
}

/// Registry of configured stores.
#[async_trait]
pub trait StoreDirectory: Send + Sync {
    async fn list_stores(&self, filter: &StoreFilter) -> AppResult<Vec<Store>>;

    /// Record a successful sync so modified-only runs have a watermark.
    async fn mark_synced(&self, store_id: Uuid, at: DateTime<Utc>) -> AppResult<()>;
}

/// Downloads remote images into an owner-keyed filesystem area and returns
/// the local paths. Partial results are acceptable; the collaborator decides
/// which individual failures to swallow.
#[async_trait]
pub trait ImageArchiver: Send + Sync {
    async fn download_images(
        &self,
        urls: &[String],
        owner_id: Uuid,
        delay_ms: u64,
    ) -> AppResult<Vec<String>>;
}

/// Credential encryption collaborator.
pub trait CredentialCipher: Send + Sync {
    fn encrypt(&self, plain: &str) -> AppResult<String>;
    fn decrypt(&self, cipher: &str) -> AppResult<String>;
}
