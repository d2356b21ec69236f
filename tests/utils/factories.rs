/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use chrono::{DateTime, Utc};
use uuid::Uuid;

use storesync::modules::catalog::{CatalogItem, Store, Variant};
use storesync::modules::platform::Platform;

pub struct CatalogItemFactory {
    remote_id: u64,
    title: String,
    handle: Option<String>,
    vendor: Option<String>,
    tags: Vec<String>,
    images: Vec<String>,
    variants: Vec<Variant>,
    updated_at: Option<DateTime<Utc>>,
}

impl Default for CatalogItemFactory {
    fn default() -> Self {
        Self {
            remote_id: 1000,
            title: "Test Product".to_string(),
            handle: Some("test-product".to_string()),
            vendor: Some("Acme".to_string()),
            tags: Vec::new(),
            images: Vec::new(),
            variants: Vec::new(),
            updated_at: None,
        }
    }
}

impl CatalogItemFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote_id(mut self, remote_id: u64) -> Self {
        self.remote_id = remote_id;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_handle(mut self, handle: &str) -> Self {
        self.handle = Some(handle.to_string());
        self
    }

    pub fn without_handle(mut self) -> Self {
        self.handle = None;
        self
    }

    pub fn with_images(mut self, images: Vec<&str>) -> Self {
        self.images = images.into_iter().map(str::to_string).collect();
        self
    }

    pub fn with_sku(mut self, sku: &str) -> Self {
        let position = self.variants.len() as u64 + 1;
        self.variants.push(Variant {
            remote_id: self.remote_id * 100 + position,
            sku: Some(sku.to_string()),
            price: "19.99".to_string(),
            compare_at_price: None,
            image: None,
            option1: Some("Default".to_string()),
            option2: None,
            option3: None,
        });
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn build(self) -> CatalogItem {
        CatalogItem {
            remote_id: self.remote_id,
            title: self.title,
            handle: self.handle,
            body_html: None,
            vendor: self.vendor,
            tags: self.tags,
            options: Vec::new(),
            images: self.images,
            variants: self.variants,
            published_at: None,
            updated_at: self.updated_at,
        }
    }
}

/// A page of distinct items, handles `{prefix}-1..=count`.
pub fn catalog_page(count: usize, prefix: &str) -> Vec<CatalogItem> {
    (1..=count)
        .map(|index| {
            CatalogItemFactory::new()
                .with_remote_id(index as u64)
                .with_title(&format!("{} {}", prefix, index))
                .with_handle(&format!("{}-{}", prefix.to_lowercase(), index))
                .with_sku(&format!("{}-SKU-{}", prefix.to_uppercase(), index))
                .build()
        })
        .collect()
}

pub struct StoreFactory {
    id: Uuid,
    name: String,
    base_url: String,
    active: bool,
    api_credential: Option<String>,
    last_synced_at: Option<DateTime<Utc>>,
}

impl Default for StoreFactory {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Test Store".to_string(),
            base_url: "https://test-store.myshopify.com".to_string(),
            active: true,
            api_credential: None,
            last_synced_at: None,
        }
    }
}

impl StoreFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn with_last_synced_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_synced_at = Some(at);
        self
    }

    pub fn build(self) -> Store {
        Store {
            id: self.id,
            name: self.name,
            platform: Platform::Shopify,
            base_url: self.base_url,
            api_credential: self.api_credential,
            active: self.active,
            last_synced_at: self.last_synced_at,
        }
    }
}
