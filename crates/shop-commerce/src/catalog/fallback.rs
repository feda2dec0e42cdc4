//! Built-in catalog data served when the API is unreachable.
//!
//! Every lookup here is total: callers always get something to render.

use crate::catalog::{Brand, Category, Product, ProductImage, TaxonRef};
use crate::ids::{BrandId, CategoryId, ImageId, ProductId};
use crate::money::{Currency, Money};

/// Fallback product list.
pub fn products() -> Vec<Product> {
    vec![premium_laptop_pro(), budget_laptop()]
}

/// Fallback for a single product: the entry with a matching slug, else the
/// first entry.
pub fn product(slug: &str) -> Product {
    products()
        .into_iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(premium_laptop_pro)
}

/// Fallback related products: every entry except `product_id` itself.
pub fn related_products(product_id: &ProductId) -> Vec<Product> {
    products()
        .into_iter()
        .filter(|p| &p.id != product_id)
        .collect()
}

/// Fallback category list.
pub fn categories() -> Vec<Category> {
    [
        ("cat1", "Laptops", "laptops", 15),
        ("cat2", "Accessories", "accessories", 25),
        ("cat3", "Monitors", "monitors", 10),
        ("cat4", "Components", "components", 30),
    ]
    .into_iter()
    .map(|(id, name, slug, count)| Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        slug: slug.to_string(),
        count: Some(count),
    })
    .collect()
}

/// Fallback brand list.
pub fn brands() -> Vec<Brand> {
    [
        ("brand1", "TechBrand", "techbrand", 12),
        ("brand2", "ValueTech", "valuetech", 8),
        ("brand3", "PremiumTech", "premiumtech", 5),
        ("brand4", "BudgetTech", "budgettech", 10),
    ]
    .into_iter()
    .map(|(id, name, slug, count)| Brand {
        id: BrandId::new(id),
        name: name.to_string(),
        slug: slug.to_string(),
        count: Some(count),
    })
    .collect()
}

fn premium_laptop_pro() -> Product {
    Product {
        id: ProductId::new("mock-1"),
        name: "Premium Laptop Pro".to_string(),
        slug: "premium-laptop-pro".to_string(),
        description: "A high-end laptop with the latest features.".to_string(),
        short_description: Some("High-performance laptop".to_string()),
        price: Money::new(129999, Currency::USD),
        sale_price: Some(Money::new(119999, Currency::USD)),
        images: vec![image(
            "img1",
            "https://images.unsplash.com/photo-1611078489935-0cb964de46d6?q=80&w=1000",
            "Laptop",
        )],
        primary_image: None,
        category: Some(TaxonRef::new("cat1", "Laptops", "laptops")),
        category_name: None,
        brand: Some(TaxonRef::new("brand1", "TechBrand", "techbrand")),
        brand_name: None,
        stock: 10,
        rating: 4.5,
        review_count: 120,
        variants: Vec::new(),
        features: Vec::new(),
        is_featured: true,
        is_on_sale: true,
    }
}

fn budget_laptop() -> Product {
    Product {
        id: ProductId::new("mock-2"),
        name: "Budget Laptop".to_string(),
        slug: "budget-laptop".to_string(),
        description: "Affordable laptop for everyday use.".to_string(),
        short_description: Some("Budget-friendly laptop".to_string()),
        price: Money::new(69999, Currency::USD),
        sale_price: None,
        images: vec![image(
            "img2",
            "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?q=80&w=1000",
            "Budget Laptop",
        )],
        primary_image: None,
        category: Some(TaxonRef::new("cat1", "Laptops", "laptops")),
        category_name: None,
        brand: Some(TaxonRef::new("brand2", "ValueTech", "valuetech")),
        brand_name: None,
        stock: 15,
        rating: 4.0,
        review_count: 85,
        variants: Vec::new(),
        features: Vec::new(),
        is_featured: false,
        is_on_sale: false,
    }
}

fn image(id: &str, url: &str, alt: &str) -> ProductImage {
    ProductImage {
        id: ImageId::new(id),
        image: url.to_string(),
        is_primary: true,
        alt_text: alt.to_string(),
    }
}
