pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use domain::entities::{
    CatalogItem, NewCatalogItem, NewVariant, OptionDef, Store, StoreFilter, StoredItem, Variant,
};
pub use domain::repositories::{CatalogStore, CredentialCipher, ImageArchiver, StoreDirectory};
pub use infrastructure::memory::{MemoryCatalogStore, MemoryStoreDirectory};
