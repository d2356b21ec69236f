pub mod http_client;
pub mod shopify;
pub mod traits;

// Re-exports for easy external access
pub use shopify::ShopifyClient;
pub use traits::{Platform, PlatformClient};
