use async_trait::async_trait;

use crate::modules::catalog::domain::entities::CatalogItem;
use crate::modules::platform::http_client::RateLimitClient;
use crate::modules::platform::traits::{Platform, PlatformClient};
use crate::shared::errors::AppResult;

use super::dto::ProductsPage;
use super::mapper::ShopifyMapper;

/// Shopify page size ceiling for the storefront export.
const MAX_PAGE_SIZE: u32 = 250;

/// Shopify storefront catalog adapter over the public `products.json` export.
pub struct ShopifyClient {
    http_client: RateLimitClient,
}

impl ShopifyClient {
    pub fn new() -> Self {
        Self {
            http_client: RateLimitClient::for_shopify(),
        }
    }

    /// Create adapter with a custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient) -> Self {
        Self { http_client }
    }

    fn page_url(base_url: &str, page: u32, page_size: u32) -> String {
        format!(
            "{}/products.json?limit={}&page={}",
            base_url.trim_end_matches('/'),
            page_size.clamp(1, MAX_PAGE_SIZE),
            page
        )
    }
}

impl Default for ShopifyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformClient for ShopifyClient {
    fn platform(&self) -> Platform {
        Platform::Shopify
    }

    async fn verify_compatible(&self, base_url: &str) -> bool {
        // A single-item page fetch doubles as the compatibility probe: any
        // network failure, non-2xx status, or unrecognizable body means the
        // endpoint is not a Shopify catalog.
        match self.fetch_page(base_url, 1, 1).await {
            Ok(_) => {
                log::info!("Shopify: {} verified as compatible", base_url);
                true
            }
            Err(e) => {
                log::info!("Shopify: {} failed compatibility probe: {}", base_url, e);
                false
            }
        }
    }

    async fn fetch_page(
        &self,
        base_url: &str,
        page: u32,
        page_size: u32,
    ) -> AppResult<Vec<CatalogItem>> {
        let url = Self::page_url(base_url, page, page_size);

        let products_page: ProductsPage = self.http_client.get(&url).await?;

        log::debug!(
            "Shopify: fetched {} products from page {} of {}",
            products_page.products.len(),
            page,
            base_url
        );

        Ok(products_page
            .products
            .into_iter()
            .map(ShopifyMapper::to_catalog_item)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_shape() {
        let url = ShopifyClient::page_url("https://demo.myshopify.com/", 3, 100);
        assert_eq!(url, "https://demo.myshopify.com/products.json?limit=100&page=3");
    }

    #[test]
    fn test_page_size_is_clamped() {
        let url = ShopifyClient::page_url("https://demo.myshopify.com", 1, 9999);
        assert!(url.contains("limit=250"));
    }
}
