use crate::modules::catalog::domain::entities::CatalogItem;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Remote commerce platforms with a catalog adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Shopify,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Shopify => write!(f, "shopify"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shopify" => Ok(Platform::Shopify),
            other => Err(format!("Unknown platform: {}", other)),
        }
    }
}

/// One concrete adapter per supported remote platform, selected at job-start
/// time.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// The platform this client handles
    fn platform(&self) -> Platform;

    /// Probe the endpoint with a single-item page fetch. True only when the
    /// response is successful and the body carries a recognizable product
    /// list; any network failure, non-2xx status, or malformed body yields
    /// false. Never fails.
    async fn verify_compatible(&self, base_url: &str) -> bool;

    /// Fetch exactly one catalog page. An empty result is a valid response
    /// and signals the caller to stop paginating.
    async fn fetch_page(
        &self,
        base_url: &str,
        page: u32,
        page_size: u32,
    ) -> AppResult<Vec<CatalogItem>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_round_trip() {
        assert_eq!("shopify".parse::<Platform>(), Ok(Platform::Shopify));
        assert_eq!(Platform::Shopify.to_string(), "shopify");
        assert!("woocommerce".parse::<Platform>().is_err());
    }
}
