//! REST client for the storefront backend.
//!
//! Wraps the backend's JSON API behind a small request builder and an async
//! [`Transport`] seam, so the same services run against `reqwest` in the
//! shell and against [`StubTransport`] in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_api::{ApiClient, ApiConfig, CatalogClient};
//! use shop_commerce::catalog::ProductFilters;
//!
//! let config = ApiConfig::new("http://localhost:8000").with_env_override();
//! let api = ApiClient::from_config(&config, cache)?;
//!
//! let catalog = CatalogClient::new(api.clone());
//! let products = catalog.products(&ProductFilters::new().search("laptop")).await;
//! if products.is_fallback() {
//!     eprintln!("showing offline catalog");
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod tokens;
mod transport;

pub mod catalog;
pub mod orders;

pub use catalog::{CatalogClient, Loaded, Source};
pub use client::{ApiClient, ApiRequest};
pub use config::{normalize_base_url, ApiConfig, API_PREFIX, API_URL_ENV, DEFAULT_TIMEOUT_SECS};
pub use error::FetchError;
pub use orders::{CouponValidation, CreateOrder, Order, OrderItem, OrderService};
pub use request::{Method, Request};
pub use response::{Page, Response};
pub use tokens::TokenStore;
pub use transport::{HttpTransport, StubTransport, Transport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ApiConfig, CatalogClient, FetchError, Loaded, OrderService, Source};
}
