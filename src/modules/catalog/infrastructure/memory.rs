//! In-memory reference implementations of the catalog repositories
//!
//! The production application maps these traits onto its own database; the
//! memory variants back tests and embedded usage without one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::modules::catalog::domain::entities::{
    NewCatalogItem, NewVariant, Store, StoreFilter, StoredItem,
};
use crate::modules::catalog::domain::repositories::{CatalogStore, StoreDirectory};
use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
struct ItemRecord {
    owner_id: Uuid,
    handle: String,
    title: String,
}

/// Catalog store backed by concurrent maps, keyed the way the real schema is:
/// items by id, a unique (owner, handle) index, variants per item.
#[derive(Default)]
pub struct MemoryCatalogStore {
    items: DashMap<Uuid, ItemRecord>,
    handles: DashMap<(Uuid, String), Uuid>,
    variants: DashMap<Uuid, Vec<NewVariant>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn variant_count(&self, item_id: Uuid) -> usize {
        self.variants
            .get(&item_id)
            .map(|entry| entry.len())
            .unwrap_or(0)
    }

    fn stored(&self, id: Uuid, record: &ItemRecord) -> StoredItem {
        StoredItem {
            id,
            owner_id: record.owner_id,
            handle: record.handle.clone(),
            title: record.title.clone(),
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn find_by_handle(&self, owner_id: Uuid, handle: &str) -> AppResult<Option<StoredItem>> {
        let Some(item_id) = self
            .handles
            .get(&(owner_id, handle.to_string()))
            .map(|entry| *entry)
        else {
            return Ok(None);
        };
        Ok(self
            .items
            .get(&item_id)
            .map(|record| self.stored(item_id, &record)))
    }

    async fn find_by_sku(&self, owner_id: Uuid, sku: &str) -> AppResult<Option<StoredItem>> {
        for entry in self.variants.iter() {
            if entry
                .value()
                .iter()
                .any(|variant| variant.sku.as_deref() == Some(sku))
            {
                if let Some(record) = self.items.get(entry.key()) {
                    if record.owner_id == owner_id {
                        return Ok(Some(self.stored(*entry.key(), &record)));
                    }
                }
            }
        }
        Ok(None)
    }

    async fn create_item(&self, item: &NewCatalogItem) -> AppResult<StoredItem> {
        let key = (item.owner_id, item.handle.clone());
        if self.handles.contains_key(&key) {
            return Err(AppError::Storage(format!(
                "Unique constraint violation on handle '{}'",
                item.handle
            )));
        }

        let id = Uuid::new_v4();
        let record = ItemRecord {
            owner_id: item.owner_id,
            handle: item.handle.clone(),
            title: item.title.clone(),
        };
        let stored = self.stored(id, &record);
        self.items.insert(id, record);
        self.handles.insert(key, id);
        Ok(stored)
    }

    async fn update_item(&self, item_id: Uuid, item: &NewCatalogItem) -> AppResult<StoredItem> {
        let mut record = self.items.get_mut(&item_id).ok_or_else(|| {
            AppError::NotFound(format!("Catalog item {} not found", item_id))
        })?;

        if record.handle != item.handle {
            self.handles
                .remove(&(record.owner_id, record.handle.clone()));
            self.handles
                .insert((item.owner_id, item.handle.clone()), item_id);
        }
        record.owner_id = item.owner_id;
        record.handle = item.handle.clone();
        record.title = item.title.clone();
        Ok(self.stored(item_id, &record))
    }

    async fn delete_variants(&self, item_id: Uuid) -> AppResult<usize> {
        Ok(self
            .variants
            .remove(&item_id)
            .map(|(_, removed)| removed.len())
            .unwrap_or(0))
    }

    async fn insert_variants(&self, item_id: Uuid, variants: &[NewVariant]) -> AppResult<usize> {
        self.variants
            .entry(item_id)
            .or_default()
            .extend(variants.iter().cloned());
        Ok(variants.len())
    }
}

/// Store registry backed by a concurrent map, preserving registration order
/// so sync targets resolve deterministically.
#[derive(Default)]
pub struct MemoryStoreDirectory {
    stores: DashMap<Uuid, (usize, Store)>,
    next_position: AtomicUsize,
}

impl MemoryStoreDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_store(&self, store: Store) {
        let position = self.next_position.fetch_add(1, Ordering::Relaxed);
        self.stores.insert(store.id, (position, store));
    }

    pub fn get_store(&self, store_id: Uuid) -> Option<Store> {
        self.stores.get(&store_id).map(|entry| entry.1.clone())
    }
}

#[async_trait]
impl StoreDirectory for MemoryStoreDirectory {
    async fn list_stores(&self, filter: &StoreFilter) -> AppResult<Vec<Store>> {
        let mut matched: Vec<(usize, Store)> = self
            .stores
            .iter()
            .filter(|entry| filter.matches(&entry.1))
            .map(|entry| entry.value().clone())
            .collect();
        matched.sort_by_key(|(position, _)| *position);
        Ok(matched.into_iter().map(|(_, store)| store).collect())
    }

    async fn mark_synced(&self, store_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        let mut entry = self.stores.get_mut(&store_id).ok_or_else(|| {
            AppError::NotFound(format!("Store {} not found", store_id))
        })?;
        entry.1.last_synced_at = Some(at);
        Ok(())
    }
}
