//! Catalog browsing commands.

use anyhow::Result;
use serde_json::json;
use shop_commerce::catalog::{Product, ProductFilters, SortOption};
use shop_commerce::price::PriceInput;
use shop_commerce::{Currency, Money};

use super::{ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{dollars, truncate};

/// Build listing filters from command-line flags.
///
/// Unparseable prices are ignored, as are blank slugs and search text.
pub fn filters_from_args(args: &ProductsArgs) -> ProductFilters {
    ProductFilters {
        category: args.category.clone(),
        brand: args.brand.clone(),
        min_price: args.min_price.as_deref().and_then(parse_price_filter),
        max_price: args.max_price.as_deref().and_then(parse_price_filter),
        search: args.search.clone(),
        sort: SortOption::parse(&args.sort),
    }
}

fn parse_price_filter(raw: &str) -> Option<Money> {
    PriceInput::from(raw)
        .to_f64()
        .filter(|v| *v >= 0.0)
        .map(|v| Money::from_decimal(v, Currency::USD))
}

/// `shop products`
pub async fn list(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let filters = filters_from_args(&args);
    let catalog = ctx.catalog();

    let spinner = ctx.output.spinner("Loading products...");
    let (products, categories, brands) = tokio::join!(
        catalog.products(&filters),
        catalog.categories(),
        catalog.brands()
    );
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "source": products.source.to_string(),
            "products": products.value,
        }));
        return Ok(());
    }

    ctx.output.source_notice(products.source);
    if let Some(slug) = filters.category.as_deref().filter(|s| !s.trim().is_empty()) {
        if !categories.value.iter().any(|c| c.slug == slug) {
            ctx.output.warn(&format!("Unknown category: {}", slug));
        }
    }
    if let Some(slug) = filters.brand.as_deref().filter(|s| !s.trim().is_empty()) {
        if !brands.value.iter().any(|b| b.slug == slug) {
            ctx.output.warn(&format!("Unknown brand: {}", slug));
        }
    }

    ctx.output.header(&format!(
        "Products ({}, sorted by {})",
        products.value.len(),
        filters.sort.display_name()
    ));
    if products.value.is_empty() {
        ctx.output.info("No products match these filters");
        return Ok(());
    }

    print_product_table(&products.value, ctx);
    Ok(())
}

pub(crate) fn print_product_table(products: &[Product], ctx: &Context) {
    let widths = [20, 30, 12, 12, 8];
    ctx.output
        .table_row(&["SLUG", "NAME", "PRICE", "WAS", "RATING"], &widths);
    for product in products {
        let was = if product.is_discounted() {
            dollars(product.price)
        } else {
            String::new()
        };
        ctx.output.table_row(
            &[
                &truncate(&product.slug, 20),
                &truncate(&product.name, 30),
                &dollars(product.current_price()),
                &was,
                &format!("{:.1}", product.rating),
            ],
            &widths,
        );
    }
}

/// `shop product <slug>`
pub async fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let spinner = ctx.output.spinner("Loading product...");
    let product = catalog.product(&args.slug).await;
    let related = if args.related {
        Some(catalog.related_products(&product.value.id).await)
    } else {
        None
    };
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "source": product.source.to_string(),
            "product": product.value,
            "related": related.as_ref().map(|r| &r.value),
        }));
        return Ok(());
    }

    ctx.output.source_notice(product.source);
    let p = &product.value;
    ctx.output.header(&p.name);
    ctx.output.kv("id", p.id.as_str());
    ctx.output.kv("slug", &p.slug);
    ctx.output.kv("price", &dollars(p.current_price()));
    if p.is_discounted() {
        ctx.output.kv(
            "list price",
            &format!("{} ({}% off)", dollars(p.price), p.discount_percentage()),
        );
    }
    if !p.category_name().is_empty() {
        ctx.output.kv("category", p.category_name());
    }
    if !p.brand_name().is_empty() {
        ctx.output.kv("brand", p.brand_name());
    }
    ctx.output.kv(
        "rating",
        &format!("{:.1} ({} reviews)", p.rating, p.review_count),
    );
    ctx.output.kv(
        "stock",
        if p.in_stock() { "in stock" } else { "out of stock" },
    );
    if let Some(image) = p.image_url() {
        ctx.output.kv("image", image);
    }
    if !p.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&p.description);
    }
    for feature in &p.features {
        ctx.output.list_item(feature);
    }
    for variant in &p.variants {
        ctx.output.list_item(&format!(
            "{} - {}",
            variant.name,
            dollars(variant.current_price())
        ));
    }

    if let Some(related) = related {
        ctx.output.header("Related products");
        print_product_table(&related.value, ctx);
    }
    Ok(())
}

/// `shop categories`
pub async fn categories(ctx: &Context) -> Result<()> {
    let loaded = ctx.catalog().categories().await;
    if ctx.output.is_json() {
        ctx.output.json(&loaded.value);
        return Ok(());
    }

    ctx.output.source_notice(loaded.source);
    ctx.output.header("Categories");
    for category in &loaded.value {
        let count = category
            .count
            .map(|c| format!(" ({})", c))
            .unwrap_or_default();
        ctx.output
            .list_item(&format!("{} [{}]{}", category.name, category.slug, count));
    }
    Ok(())
}

/// `shop brands`
pub async fn brands(ctx: &Context) -> Result<()> {
    let loaded = ctx.catalog().brands().await;
    if ctx.output.is_json() {
        ctx.output.json(&loaded.value);
        return Ok(());
    }

    ctx.output.source_notice(loaded.source);
    ctx.output.header("Brands");
    for brand in &loaded.value {
        ctx.output.list_item(&format!("{} [{}]", brand.name, brand.slug));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(min: Option<&str>, max: Option<&str>, sort: &str) -> ProductsArgs {
        ProductsArgs {
            category: Some("laptops".to_string()),
            brand: None,
            min_price: min.map(str::to_string),
            max_price: max.map(str::to_string),
            search: None,
            sort: sort.to_string(),
        }
    }

    #[test]
    fn test_filters_from_args() {
        let filters = filters_from_args(&args(Some("100"), Some("999.99"), "price-high"));
        assert_eq!(filters.category.as_deref(), Some("laptops"));
        assert_eq!(filters.min_price, Some(Money::new(10_000, Currency::USD)));
        assert_eq!(filters.max_price, Some(Money::new(99_999, Currency::USD)));
        assert_eq!(filters.sort, SortOption::PriceHigh);
    }

    #[test]
    fn test_bad_prices_ignored() {
        let filters = filters_from_args(&args(Some("cheap"), Some("-5"), "whatever"));
        assert_eq!(filters.min_price, None);
        assert_eq!(filters.max_price, None);
        assert_eq!(filters.sort, SortOption::Featured);
    }
}
