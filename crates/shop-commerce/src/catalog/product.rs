//! Product, variant and image types as served by the storefront API.

use crate::cart::CartItem;
use crate::catalog::{Brand, BrandRef, Category, CategoryRef};
use crate::ids::{ImageId, ProductId, VariantId};
use crate::money::Money;
use crate::price::{self, PriceInput};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A product in the catalog.
///
/// The list endpoint and the detail endpoint disagree on shape: the list
/// sends `category`/`brand` as bare keys next to `category_name`,
/// `brand_name` and `primary_image`, the detail sends nested objects and an
/// `images` array. Both decode into this type; use the accessors rather
/// than the raw fields to read names and images.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Full description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Short description for listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// List price.
    #[serde(with = "price::lenient")]
    pub price: Money,
    /// Sale price, if the product is discounted.
    #[serde(default, with = "price::lenient_option")]
    pub sale_price: Option<Money>,
    /// Product images.
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ProductImage>,
    /// Primary image URL (list shape).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<String>,
    /// Category.
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// Category name (list shape).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Brand.
    #[serde(default)]
    pub brand: Option<BrandRef>,
    /// Brand name (list shape).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// Units in stock.
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: i64,
    /// Average rating, 0 to 5.
    #[serde(default, alias = "average_rating", deserialize_with = "lenient_number")]
    pub rating: f64,
    /// Number of reviews.
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_count: i64,
    /// Purchasable variants.
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<ProductVariant>,
    /// Feature bullet points.
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_on_sale: bool,
}

impl Product {
    /// The price a customer pays: the sale price when set, else the list price.
    pub fn current_price(&self) -> Money {
        match self.sale_price {
            Some(sale) if sale.is_positive() => sale,
            _ => self.price,
        }
    }

    /// Check if a positive sale price is set.
    pub fn is_discounted(&self) -> bool {
        self.sale_price.is_some_and(|sale| sale.is_positive())
    }

    /// Discount off the list price, in whole percent.
    pub fn discount_percentage(&self) -> u32 {
        if !self.is_discounted() || !self.price.is_positive() {
            return 0;
        }
        let saved = self.price.amount_cents - self.current_price().amount_cents;
        if saved <= 0 {
            return 0;
        }
        ((saved as f64 / self.price.amount_cents as f64) * 100.0).round() as u32
    }

    /// Category display name, from either response shape.
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
            .or(self.category_name.as_deref())
            .unwrap_or_default()
    }

    /// Category slug, if known.
    pub fn category_slug(&self) -> &str {
        self.category.as_ref().map(|c| c.slug.as_str()).unwrap_or_default()
    }

    /// Brand display name, from either response shape.
    pub fn brand_name(&self) -> &str {
        self.brand
            .as_ref()
            .map(|b| b.name.as_str())
            .filter(|name| !name.is_empty())
            .or(self.brand_name.as_deref())
            .unwrap_or_default()
    }

    /// Brand slug, if known.
    pub fn brand_slug(&self) -> &str {
        self.brand.as_ref().map(|b| b.slug.as_str()).unwrap_or_default()
    }

    /// Check if the category or brand arrived as a bare key (list shape).
    pub fn has_unresolved_taxonomy(&self) -> bool {
        self.category.as_ref().is_some_and(|c| c.slug.is_empty())
            || self.brand.as_ref().is_some_and(|b| b.slug.is_empty())
    }

    /// Fill in the name and slug of bare-key category and brand references
    /// by looking their ids up in `categories` and `brands`.
    ///
    /// References with no matching id are left as they are.
    pub fn resolve_taxonomy(&mut self, categories: &[Category], brands: &[Brand]) {
        if let Some(category) = self.category.as_mut().filter(|c| c.slug.is_empty()) {
            if let Some(found) = categories.iter().find(|c| c.id == category.id) {
                *category = CategoryRef::from(found);
            }
        }
        if let Some(brand) = self.brand.as_mut().filter(|b| b.slug.is_empty()) {
            if let Some(found) = brands.iter().find(|b| b.id == brand.id) {
                *brand = BrandRef::from(found);
            }
        }
    }

    /// URL of the image to show for this product.
    ///
    /// Prefers the image flagged primary, then the first image, then the
    /// list shape's `primary_image`.
    pub fn image_url(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
            .map(|img| img.image.as_str())
            .or(self.primary_image.as_deref())
    }

    /// Check if any units are in stock.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// The default variant, or the first one.
    pub fn default_variant(&self) -> Option<&ProductVariant> {
        self.variants
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.variants.first())
    }

    /// A cart line for this product at its current price.
    pub fn to_cart_item(&self, quantity: i64) -> CartItem {
        CartItem::new(
            self.id.clone(),
            self.name.clone(),
            self.current_price(),
            self.image_url().unwrap_or_default(),
            quantity,
        )
    }
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub id: ImageId,
    /// Image URL.
    pub image: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alt_text: String,
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductVariant {
    pub id: VariantId,
    pub name: String,
    #[serde(with = "price::lenient")]
    pub price: Money,
    #[serde(default, with = "price::lenient_option")]
    pub sale_price: Option<Money>,
    /// Option values, e.g. `{"Color": "Silver"}`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_default: bool,
}

impl ProductVariant {
    /// The price a customer pays for this variant.
    pub fn current_price(&self) -> Money {
        self.sale_price.filter(Money::is_positive).unwrap_or(self.price)
    }
}

/// Decode `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a number that may arrive as a string; anything else reads as 0.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| PriceInput::from(v).to_f64())
        .unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{BrandId, CategoryId};

    fn detail_json() -> serde_json::Value {
        serde_json::json!({
            "id": 12,
            "name": "Ultrabook 14",
            "slug": "ultrabook-14",
            "sku": "UB-14",
            "description": "Thin and light.",
            "short_description": null,
            "price": "999.00",
            "sale_price": "899.00",
            "is_on_sale": true,
            "category": {"id": 3, "name": "Laptops", "slug": "laptops"},
            "brand": {"id": 9, "name": "TechBrand", "slug": "techbrand"},
            "images": [
                {"id": 1, "image": "/media/side.jpg", "is_primary": false, "alt_text": null},
                {"id": 2, "image": "/media/front.jpg", "is_primary": true, "alt_text": "Front"}
            ],
            "variants": [
                {"id": 30, "name": "16GB", "price": "1099.00", "sale_price": null, "is_default": false},
                {"id": 31, "name": "8GB", "price": "999.00", "sale_price": null, "is_default": true}
            ],
            "is_featured": false
        })
    }

    #[test]
    fn test_decode_detail_shape() {
        let product: Product = serde_json::from_value(detail_json()).unwrap();
        assert_eq!(product.id.as_str(), "12");
        assert_eq!(product.price.amount_cents, 99900);
        assert_eq!(product.current_price().amount_cents, 89900);
        assert_eq!(product.category_name(), "Laptops");
        assert_eq!(product.brand_slug(), "techbrand");
        assert_eq!(product.image_url(), Some("/media/front.jpg"));
        assert_eq!(product.default_variant().unwrap().name, "8GB");
        assert_eq!(product.discount_percentage(), 10);
        assert_eq!(product.stock, 0);
    }

    fn list_json() -> serde_json::Value {
        serde_json::json!({
            "id": 5,
            "name": "Mouse",
            "slug": "mouse",
            "category": 2,
            "category_name": "Accessories",
            "brand": 4,
            "brand_name": "BudgetTech",
            "price": "19.99",
            "sale_price": null,
            "primary_image": "http://localhost:8000/media/mouse.jpg",
            "is_featured": true
        })
    }

    #[test]
    fn test_decode_list_shape() {
        let product: Product = serde_json::from_value(list_json()).unwrap();

        assert_eq!(product.category.as_ref().unwrap().id.as_str(), "2");
        assert_eq!(product.category_name(), "Accessories");
        assert_eq!(product.category_slug(), "");
        assert_eq!(product.brand_name(), "BudgetTech");
        assert_eq!(product.image_url(), Some("http://localhost:8000/media/mouse.jpg"));
        assert_eq!(product.current_price().amount_cents, 1999);
        assert!(!product.is_discounted());
    }

    #[test]
    fn test_resolve_list_shape_taxonomy() {
        let mut product: Product = serde_json::from_value(list_json()).unwrap();
        assert!(product.has_unresolved_taxonomy());

        let categories = vec![
            Category {
                id: CategoryId::new("1"),
                name: "Laptops".to_string(),
                slug: "laptops".to_string(),
                count: None,
            },
            Category {
                id: CategoryId::new("2"),
                name: "Accessories".to_string(),
                slug: "accessories".to_string(),
                count: Some(12),
            },
        ];
        product.resolve_taxonomy(&categories, &[]);

        assert_eq!(product.category_slug(), "accessories");
        assert_eq!(product.category_name(), "Accessories");
        // No brand list to resolve against.
        assert_eq!(product.brand_slug(), "");
        assert!(product.has_unresolved_taxonomy());

        let brands = vec![Brand {
            id: BrandId::new("4"),
            name: "BudgetTech".to_string(),
            slug: "budgettech".to_string(),
            count: None,
        }];
        product.resolve_taxonomy(&categories, &brands);
        assert_eq!(product.brand_slug(), "budgettech");
        assert!(!product.has_unresolved_taxonomy());
    }

    #[test]
    fn test_resolve_keeps_nested_refs() {
        let mut product: Product = serde_json::from_value(detail_json()).unwrap();
        let before = product.clone();
        product.resolve_taxonomy(&crate::catalog::fallback::categories(), &[]);
        assert_eq!(product, before);
    }

    #[test]
    fn test_rating_as_string() {
        let mut json = detail_json();
        json["average_rating"] = serde_json::json!("4.25");
        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.rating, 4.25);
    }

    #[test]
    fn test_to_cart_item_uses_current_price() {
        let product: Product = serde_json::from_value(detail_json()).unwrap();
        let item = product.to_cart_item(2);
        assert_eq!(item.id, product.id);
        assert_eq!(item.price.amount_cents, 89900);
        assert_eq!(item.image, "/media/front.jpg");
        assert_eq!(item.quantity, 2);
    }
}
