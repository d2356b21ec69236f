use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable good as represented in the remote platform's export format.
///
/// `handle` is the canonical slug and the collision key for duplicate
/// detection; items without one never participate in collision checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub remote_id: u64,
    pub title: String,
    pub handle: Option<String>,
    pub body_html: Option<String>,
    pub vendor: Option<String>,
    pub tags: Vec<String>,
    pub options: Vec<OptionDef>,
    /// Image URLs, in export order.
    pub images: Vec<String>,
    pub variants: Vec<Variant>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An option axis (e.g. "Size") and its values as exported by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDef {
    pub name: String,
    pub values: Vec<String>,
}

/// A specific sellable configuration of a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub remote_id: u64,
    pub sku: Option<String>,
    /// Price as exported by the platform (string-decimal).
    pub price: String,
    pub compare_at_price: Option<String>,
    /// URL of the variant's own image, when the export carries one.
    pub image: Option<String>,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
}

impl CatalogItem {
    /// All non-empty SKUs across this item's variants.
    pub fn skus(&self) -> Vec<&str> {
        self.variants
            .iter()
            .filter_map(|variant| variant.sku.as_deref())
            .filter(|sku| !sku.is_empty())
            .collect()
    }
}

/// A catalog item as persisted by the `CatalogStore` collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredItem {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub handle: String,
    pub title: String,
}

/// Insertable catalog record handed to the `CatalogStore` collaborator.
#[derive(Debug, Clone)]
pub struct NewCatalogItem {
    pub owner_id: Uuid,
    pub handle: String,
    pub title: String,
    pub body_html: Option<String>,
    pub vendor: Option<String>,
    pub tags: Vec<String>,
    /// Local filesystem paths produced by the image archiver.
    pub image_paths: Vec<String>,
}

/// Insertable variant record.
#[derive(Debug, Clone)]
pub struct NewVariant {
    pub sku: Option<String>,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
}

impl NewVariant {
    pub fn from_remote(variant: &Variant) -> Self {
        Self {
            sku: variant.sku.clone(),
            price: variant.price.clone(),
            compare_at_price: variant.compare_at_price.clone(),
            option1: variant.option1.clone(),
            option2: variant.option2.clone(),
            option3: variant.option3.clone(),
        }
    }
}
