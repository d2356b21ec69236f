use crate::modules::catalog::domain::entities::{CatalogItem, OptionDef, Variant};

use super::dto::ProductDto;

/// Maps Shopify export shapes onto the domain catalog model.
pub struct ShopifyMapper;

impl ShopifyMapper {
    pub fn to_catalog_item(product: ProductDto) -> CatalogItem {
        CatalogItem {
            remote_id: product.id,
            title: product.title,
            handle: product.handle.filter(|handle| !handle.is_empty()),
            body_html: product.body_html,
            vendor: product.vendor,
            tags: product.tags,
            options: product
                .options
                .into_iter()
                .map(|option| OptionDef {
                    name: option.name,
                    values: option.values,
                })
                .collect(),
            images: product.images.into_iter().map(|image| image.src).collect(),
            variants: product
                .variants
                .into_iter()
                .map(|variant| Variant {
                    remote_id: variant.id,
                    sku: variant.sku.filter(|sku| !sku.is_empty()),
                    price: variant.price,
                    compare_at_price: variant.compare_at_price,
                    image: variant.featured_image.map(|image| image.src),
                    option1: variant.option1,
                    option2: variant.option2,
                    option3: variant.option3,
                })
                .collect(),
            published_at: product.published_at,
            updated_at: product.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_export_product() {
        let raw = serde_json::json!({
            "id": 632910392,
            "title": "IPod Nano - 8GB",
            "handle": "ipod-nano",
            "body_html": "<p>It's the small iPod with a big idea.</p>",
            "vendor": "Apple",
            "tags": ["Emotive", "Flash Memory"],
            "updated_at": "2024-03-11T12:00:00Z",
            "options": [{"name": "Color", "values": ["Pink", "Red"]}],
            "images": [{"src": "https://cdn.example.com/ipod-nano.png"}],
            "variants": [{
                "id": 808950810,
                "sku": "IPOD2008PINK",
                "price": "199.00",
                "compare_at_price": "249.00",
                "option1": "Pink"
            }]
        });
        let product: super::super::dto::ProductDto = serde_json::from_value(raw).unwrap();

        let item = ShopifyMapper::to_catalog_item(product);
        assert_eq!(item.remote_id, 632910392);
        assert_eq!(item.handle.as_deref(), Some("ipod-nano"));
        assert_eq!(item.images, vec!["https://cdn.example.com/ipod-nano.png"]);
        assert_eq!(item.variants.len(), 1);
        assert_eq!(item.variants[0].sku.as_deref(), Some("IPOD2008PINK"));
        assert_eq!(item.variants[0].option1.as_deref(), Some("Pink"));
        assert!(item.updated_at.is_some());
    }

    #[test]
    fn test_blank_handle_becomes_none() {
        let raw = serde_json::json!({
            "id": 1,
            "title": "No Handle",
            "handle": "",
            "variants": []
        });
        let product: super::super::dto::ProductDto = serde_json::from_value(raw).unwrap();

        let item = ShopifyMapper::to_catalog_item(product);
        assert!(item.handle.is_none());
    }
}
