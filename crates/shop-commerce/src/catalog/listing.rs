//! Client-side filtering and sorting of product lists.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Featured products first, otherwise in received order.
    #[default]
    Featured,
    /// Current price, low to high.
    PriceLow,
    /// Current price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
        }
    }

    /// Parse a sort key. Unknown keys mean [`SortOption::Featured`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "price-low" => SortOption::PriceLow,
            "price-high" => SortOption::PriceHigh,
            "rating" => SortOption::Rating,
            _ => SortOption::Featured,
        }
    }

    /// Server-side `ordering` parameter, where the API supports one.
    pub fn ordering_param(&self) -> Option<&'static str> {
        match self {
            SortOption::PriceLow => Some("price"),
            SortOption::PriceHigh => Some("-price"),
            SortOption::Featured | SortOption::Rating => None,
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => b.is_featured.cmp(&a.is_featured),
            SortOption::PriceLow => a.current_price().cmp(&b.current_price()),
            SortOption::PriceHigh => b.current_price().cmp(&a.current_price()),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters applied to a product listing.
///
/// Empty strings are treated like unset filters.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductFilters {
    /// Category slug.
    pub category: Option<String>,
    /// Brand slug.
    pub brand: Option<String>,
    /// Minimum current price, inclusive.
    pub min_price: Option<Money>,
    /// Maximum current price, inclusive.
    pub max_price: Option<Money>,
    /// Case-insensitive search text.
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortOption,
}

impl ProductFilters {
    /// Create empty filters (everything matches, featured first).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    pub fn brand(mut self, slug: impl Into<String>) -> Self {
        self.brand = Some(slug.into());
        self
    }

    pub fn price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check if a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = non_empty(&self.category) {
            if product.category_slug() != category {
                return false;
            }
        }
        if let Some(brand) = non_empty(&self.brand) {
            if product.brand_slug() != brand {
                return false;
            }
        }

        let price = product.current_price();
        if self.min_price.is_some_and(|min| price.amount_cents < min.amount_cents) {
            return false;
        }
        if self.max_price.is_some_and(|max| price.amount_cents > max.amount_cents) {
            return false;
        }

        match non_empty(&self.search) {
            Some(text) => matches_search(product, &text.to_lowercase()),
            None => true,
        }
    }

    /// Filter and sort `products`. The sort is stable.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let mut filtered: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        filtered.sort_by(|a, b| self.sort.compare(a, b));
        filtered
    }

    /// Query parameters sent with a listing request.
    ///
    /// Only the ordering goes to the server, so the response is the whole
    /// catalog and an empty one means the catalog itself is empty. Every
    /// filter is applied client-side.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        self.sort
            .ordering_param()
            .map(|ordering| ("ordering", ordering.to_string()))
            .into_iter()
            .collect()
    }

    /// Check if a category or brand filter is set.
    pub fn filters_taxonomy(&self) -> bool {
        non_empty(&self.category).is_some() || non_empty(&self.brand).is_some()
    }

    /// Check if no filter is set.
    pub fn is_empty(&self) -> bool {
        non_empty(&self.category).is_none()
            && non_empty(&self.brand).is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && non_empty(&self.search).is_none()
    }
}

/// Products currently on sale with a sale price.
pub fn deal_products(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_on_sale && p.sale_price.is_some())
        .cloned()
        .collect()
}

fn matches_search(product: &Product, needle: &str) -> bool {
    let haystacks = [
        Some(product.name.as_str()),
        Some(product.description.as_str()),
        product.short_description.as_deref(),
        Some(product.brand_name()),
        Some(product.category_name()),
    ];
    haystacks
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{fallback, TaxonRef};
    use crate::money::Currency;

    fn usd(dollars: i64) -> Money {
        Money::new(dollars * 100, Currency::USD)
    }

    fn catalog() -> Vec<Product> {
        let mut monitor = fallback::product("budget-laptop");
        monitor.id = "m-1".into();
        monitor.name = "UltraWide Monitor".to_string();
        monitor.slug = "ultrawide-monitor".to_string();
        monitor.description = "34 inch curved display".to_string();
        monitor.short_description = None;
        monitor.category = Some(TaxonRef::new("cat3", "Monitors", "monitors"));
        monitor.brand = Some(TaxonRef::new("brand3", "PremiumTech", "premiumtech"));
        monitor.price = usd(450);
        monitor.rating = 4.8;
        monitor.is_featured = true;

        let mut products = fallback::products();
        products.push(monitor);
        products
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(SortOption::parse("price-low"), SortOption::PriceLow);
        assert_eq!(SortOption::parse("PRICE-HIGH"), SortOption::PriceHigh);
        assert_eq!(SortOption::parse("rating"), SortOption::Rating);
        assert_eq!(SortOption::parse("newest"), SortOption::Featured);
        assert_eq!(SortOption::parse(""), SortOption::Featured);
    }

    #[test]
    fn test_featured_sort_is_stable() {
        let sorted = ProductFilters::new().apply(catalog());
        assert_eq!(
            names(&sorted),
            ["Premium Laptop Pro", "UltraWide Monitor", "Budget Laptop"]
        );
    }

    #[test]
    fn test_price_sorts_use_current_price() {
        let low = ProductFilters::new().sort(SortOption::PriceLow).apply(catalog());
        assert_eq!(
            names(&low),
            ["UltraWide Monitor", "Budget Laptop", "Premium Laptop Pro"]
        );

        let high = ProductFilters::new().sort(SortOption::PriceHigh).apply(catalog());
        assert_eq!(high[0].current_price(), Money::new(119999, Currency::USD));
    }

    #[test]
    fn test_rating_sort() {
        let sorted = ProductFilters::new().sort(SortOption::Rating).apply(catalog());
        assert_eq!(
            names(&sorted),
            ["UltraWide Monitor", "Premium Laptop Pro", "Budget Laptop"]
        );
    }

    #[test]
    fn test_category_and_brand_filters() {
        let laptops = ProductFilters::new().category("laptops").apply(catalog());
        assert_eq!(laptops.len(), 2);

        let value = ProductFilters::new().brand("valuetech").apply(catalog());
        assert_eq!(names(&value), ["Budget Laptop"]);

        let none = ProductFilters::new().category("laptops").brand("premiumtech").apply(catalog());
        assert!(none.is_empty());
    }

    #[test]
    fn test_price_range_inclusive() {
        let filters = ProductFilters::new().price_range(Some(usd(450)), Some(Money::new(69999, Currency::USD)));
        let result = filters.apply(catalog());
        assert_eq!(names(&result), ["UltraWide Monitor", "Budget Laptop"]);
    }

    #[test]
    fn test_search_fields() {
        // name
        assert_eq!(ProductFilters::new().search("ULTRAWIDE").apply(catalog()).len(), 1);
        // description
        assert_eq!(ProductFilters::new().search("curved").apply(catalog()).len(), 1);
        // short description
        assert_eq!(ProductFilters::new().search("budget-friendly").apply(catalog()).len(), 1);
        // brand name
        assert_eq!(ProductFilters::new().search("techbrand").apply(catalog()).len(), 1);
        // category name
        assert_eq!(ProductFilters::new().search("monitors").apply(catalog()).len(), 1);
        assert!(ProductFilters::new().search("toaster").apply(catalog()).is_empty());
    }

    #[test]
    fn test_blank_filters_ignored() {
        let filters = ProductFilters::new().category("  ").search("");
        assert!(filters.is_empty());
        assert_eq!(filters.apply(catalog()).len(), 3);
    }

    #[test]
    fn test_query_params() {
        let filters = ProductFilters::new()
            .category("laptops")
            .search("pro")
            .sort(SortOption::PriceHigh);
        assert_eq!(filters.query_params(), vec![("ordering", "-price".to_string())]);
        assert!(ProductFilters::new().search("pro").query_params().is_empty());
    }

    #[test]
    fn test_filters_taxonomy() {
        assert!(ProductFilters::new().category("laptops").filters_taxonomy());
        assert!(ProductFilters::new().brand("techbrand").filters_taxonomy());
        assert!(!ProductFilters::new().category(" ").search("pro").filters_taxonomy());
    }

    #[test]
    fn test_deal_products() {
        let deals = deal_products(&catalog());
        assert_eq!(names(&deals), ["Premium Laptop Pro"]);
    }
}
