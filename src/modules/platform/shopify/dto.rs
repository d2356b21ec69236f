//! Wire shapes of the Shopify storefront `products.json` export

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProductsPage {
    pub products: Vec<ProductDto>,
}

#[derive(Debug, Deserialize)]
pub struct ProductDto {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub options: Vec<OptionDto>,
    #[serde(default)]
    pub images: Vec<ImageDto>,
    #[serde(default)]
    pub variants: Vec<VariantDto>,
}

#[derive(Debug, Deserialize)]
pub struct OptionDto {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImageDto {
    pub src: String,
}

#[derive(Debug, Deserialize)]
pub struct VariantDto {
    pub id: u64,
    #[serde(default)]
    pub sku: Option<String>,
    pub price: String,
    #[serde(default)]
    pub compare_at_price: Option<String>,
    #[serde(default)]
    pub featured_image: Option<ImageDto>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
}
