//! Catalog endpoints with built-in fallback data.
//!
//! Every call makes exactly one attempt. When it fails for any reason the
//! caller still gets something to show, taken from
//! [`shop_commerce::catalog::fallback`], and the result says so.

use crate::response::list_results;
use crate::{ApiClient, FetchError};
use shop_commerce::catalog::{fallback, Brand, Category, Product, ProductFilters};
use shop_commerce::ProductId;
use std::fmt;
use tracing::{debug, info, warn};

/// Where a catalog value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Live,
    Fallback,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Live => f.write_str("live"),
            Source::Fallback => f.write_str("fallback"),
        }
    }
}

/// A catalog value tagged with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Loaded<T> {
    pub fn live(value: T) -> Self {
        Self {
            value,
            source: Source::Live,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            source: Source::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == Source::Fallback
    }

    /// Transform the value, keeping the source.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            value: f(self.value),
            source: self.source,
        }
    }
}

/// Client for the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    api: ApiClient,
}

impl CatalogClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Product listing, filtered and sorted client-side.
    ///
    /// Only the ordering goes to the server, so an empty result set means
    /// an empty catalog and is treated like a failure. When a category or
    /// brand filter is set and the list carries bare taxonomy keys, the
    /// categories and brands are fetched to resolve them first.
    pub async fn products(&self, filters: &ProductFilters) -> Loaded<Vec<Product>> {
        let result = async {
            let response = self
                .api
                .get("/products/products/")
                .public()
                .query_pairs(filters.query_params())
                .send()
                .await?
                .error_for_status()?;
            list_results::<Product>(&response)
        }
        .await;

        let loaded = match result {
            Ok(mut products) if !products.is_empty() => {
                info!(count = products.len(), "loaded products");
                if filters.filters_taxonomy() && products.iter().any(Product::has_unresolved_taxonomy) {
                    self.resolve_taxonomy(&mut products).await;
                }
                Loaded::live(products)
            }
            Ok(_) => {
                warn!("product list empty, using fallback data");
                Loaded::fallback(fallback::products())
            }
            Err(e) => {
                warn!(error = %e, "failed to load products, using fallback data");
                Loaded::fallback(fallback::products())
            }
        };
        loaded.map(|products| filters.apply(products))
    }

    /// A single product by slug.
    pub async fn product(&self, slug: &str) -> Loaded<Product> {
        let path = format!("/products/products/{}/", slug);
        match self.api.get(&path).public().fetch_json::<Product>().await {
            Ok(product) => {
                info!(slug, "loaded product");
                Loaded::live(product)
            }
            Err(e) => {
                warn!(slug, error = %e, "failed to load product, using fallback data");
                Loaded::fallback(fallback::product(slug))
            }
        }
    }

    /// Products related to `product_id`.
    pub async fn related_products(&self, product_id: &ProductId) -> Loaded<Vec<Product>> {
        let path = format!("/products/products/{}/related/", product_id);
        match self.list::<Product>(&path).await {
            Ok(products) => {
                info!(product_id = %product_id, count = products.len(), "loaded related products");
                Loaded::live(products)
            }
            Err(e) => {
                warn!(product_id = %product_id, error = %e, "failed to load related products, using fallback data");
                Loaded::fallback(fallback::related_products(product_id))
            }
        }
    }

    /// All categories.
    pub async fn categories(&self) -> Loaded<Vec<Category>> {
        match self.list::<Category>("/products/categories/").await {
            Ok(categories) => {
                info!(count = categories.len(), "loaded categories");
                Loaded::live(categories)
            }
            Err(e) => {
                warn!(error = %e, "failed to load categories, using fallback data");
                Loaded::fallback(fallback::categories())
            }
        }
    }

    /// All brands.
    pub async fn brands(&self) -> Loaded<Vec<Brand>> {
        match self.list::<Brand>("/products/brands/").await {
            Ok(brands) => {
                info!(count = brands.len(), "loaded brands");
                Loaded::live(brands)
            }
            Err(e) => {
                warn!(error = %e, "failed to load brands, using fallback data");
                Loaded::fallback(fallback::brands())
            }
        }
    }

    async fn resolve_taxonomy(&self, products: &mut [Product]) {
        let categories = self.categories().await;
        let brands = self.brands().await;
        debug!(
            categories = %categories.source,
            brands = %brands.source,
            "resolving product taxonomy"
        );
        for product in products.iter_mut() {
            product.resolve_taxonomy(&categories.value, &brands.value);
        }
    }

    async fn list<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, FetchError> {
        let response = self.api.get(path).public().send().await?.error_for_status()?;
        list_results(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, StubTransport};
    use serde_json::json;
    use shop_commerce::catalog::SortOption;
    use shop_store::Cache;
    use std::sync::Arc;

    fn catalog(stub: StubTransport) -> (CatalogClient, Arc<StubTransport>) {
        let stub = Arc::new(stub);
        let api = ApiClient::new("", stub.clone(), Cache::in_memory());
        (CatalogClient::new(api), stub)
    }

    fn product_json(id: u32, name: &str, slug: &str, price: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "slug": slug,
            "price": price,
            "sale_price": null,
            "category_name": "Laptops",
            "brand_name": "Acme",
            "primary_image": null,
            "average_rating": "4.5",
            "is_featured": false,
            "is_on_sale": false
        })
    }

    #[tokio::test]
    async fn test_products_live() {
        let (client, stub) = catalog(StubTransport::new().json(
            Method::Get,
            "/products/products/",
            200,
            json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    product_json(1, "Zeta", "zeta", "10.00"),
                    product_json(2, "Alpha", "alpha", "5.00")
                ]
            }),
        ));

        let filters = ProductFilters::new().sort(SortOption::PriceLow).search("a");
        let loaded = client.products(&filters).await;
        assert_eq!(loaded.source, Source::Live);
        let names: Vec<_> = loaded.value.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);

        let sent = stub.last_request().unwrap();
        assert_eq!(sent.query_value("search"), None);
        assert_eq!(sent.query_value("ordering"), Some("price"));
        assert_eq!(sent.header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn test_search_miss_stays_live() {
        let (client, stub) = catalog(StubTransport::new().json(
            Method::Get,
            "/products/products/",
            200,
            json!({
                "count": 1,
                "next": null,
                "previous": null,
                "results": [product_json(1, "Zeta", "zeta", "10.00")]
            }),
        ));

        let loaded = client.products(&ProductFilters::new().search("laptop pro")).await;
        assert_eq!(loaded.source, Source::Live);
        assert!(loaded.value.is_empty());
        assert!(stub.last_request().unwrap().query.is_empty());
    }

    #[tokio::test]
    async fn test_category_filter_resolves_bare_keys() {
        let mut laptop = product_json(1, "Zeta", "zeta", "10.00");
        laptop["category"] = json!(1);
        laptop["brand"] = json!(7);
        let mut mouse = product_json(2, "Mouse", "mouse", "5.00");
        mouse["category"] = json!(2);

        let (client, stub) = catalog(
            StubTransport::new()
                .json(
                    Method::Get,
                    "/products/products/",
                    200,
                    json!({"count": 2, "next": null, "previous": null, "results": [laptop, mouse]}),
                )
                .json(
                    Method::Get,
                    "/products/categories/",
                    200,
                    json!([
                        {"id": 1, "name": "Laptops", "slug": "laptops"},
                        {"id": 2, "name": "Accessories", "slug": "accessories"}
                    ]),
                )
                .json(
                    Method::Get,
                    "/products/brands/",
                    200,
                    json!([{"id": 7, "name": "Acme", "slug": "acme"}]),
                ),
        );

        let loaded = client.products(&ProductFilters::new().category("laptops")).await;
        assert_eq!(loaded.source, Source::Live);
        let names: Vec<_> = loaded.value.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta"]);
        assert_eq!(loaded.value[0].category_slug(), "laptops");

        let loaded = client.products(&ProductFilters::new().brand("acme")).await;
        assert_eq!(loaded.value.len(), 1);
        assert_eq!(stub.requests().len(), 6);
    }

    #[tokio::test]
    async fn test_unfiltered_list_skips_taxonomy_fetch() {
        let mut laptop = product_json(1, "Zeta", "zeta", "10.00");
        laptop["category"] = json!(1);
        let (client, stub) = catalog(StubTransport::new().json(
            Method::Get,
            "/products/products/",
            200,
            json!([laptop]),
        ));

        let loaded = client.products(&ProductFilters::new()).await;
        assert_eq!(loaded.value.len(), 1);
        assert_eq!(stub.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_products_fallback_on_failure() {
        let (client, stub) = catalog(StubTransport::new());
        let loaded = client.products(&ProductFilters::new()).await;
        assert!(loaded.is_fallback());
        assert_eq!(loaded.value, fallback::products());
        assert_eq!(stub.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_products_fallback_on_empty_results() {
        let (client, _) = catalog(StubTransport::new().json(
            Method::Get,
            "/products/products/",
            200,
            json!({"count": 0, "next": null, "previous": null, "results": []}),
        ));
        let loaded = client.products(&ProductFilters::new()).await;
        assert!(loaded.is_fallback());
        assert_eq!(loaded.value.len(), 2);
    }

    #[tokio::test]
    async fn test_products_fallback_on_server_error() {
        let (client, _) = catalog(StubTransport::new().json(
            Method::Get,
            "/products/products/",
            500,
            json!({"detail": "boom"}),
        ));
        assert!(client.products(&ProductFilters::new()).await.is_fallback());
    }

    #[tokio::test]
    async fn test_product_fallback_matches_slug() {
        let (client, _) = catalog(StubTransport::new().timeout(Method::Get, "/products/products/budget-laptop/"));
        let loaded = client.product("budget-laptop").await;
        assert!(loaded.is_fallback());
        assert_eq!(loaded.value.slug, "budget-laptop");

        let loaded = client.product("unknown").await;
        assert_eq!(loaded.value.slug, "premium-laptop-pro");
    }

    #[tokio::test]
    async fn test_product_live_detail() {
        let (client, _) = catalog(StubTransport::new().json(
            Method::Get,
            "/products/products/zeta/",
            200,
            product_json(7, "Zeta", "zeta", "10.00"),
        ));
        let loaded = client.product("zeta").await;
        assert_eq!(loaded.source, Source::Live);
        assert_eq!(loaded.value.id, ProductId::new("7"));
    }

    #[tokio::test]
    async fn test_related_products_fallback_excludes_self() {
        let (client, _) = catalog(StubTransport::new());
        let loaded = client.related_products(&ProductId::new("mock-1")).await;
        assert!(loaded.is_fallback());
        assert!(loaded.value.iter().all(|p| p.id.as_str() != "mock-1"));
        assert_eq!(loaded.value.len(), 1);
    }

    #[tokio::test]
    async fn test_taxonomies() {
        let (client, _) = catalog(StubTransport::new().json(
            Method::Get,
            "/products/categories/",
            200,
            json!([{"id": 1, "name": "Phones", "slug": "phones"}]),
        ));
        let categories = client.categories().await;
        assert_eq!(categories.source, Source::Live);
        assert_eq!(categories.value[0].slug, "phones");

        let brands = client.brands().await;
        assert!(brands.is_fallback());
        assert_eq!(brands.value, fallback::brands());
    }
}
