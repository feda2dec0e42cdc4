//! Product catalog module.
//!
//! Contains product and taxonomy types, built-in fallback data and
//! client-side listing filters.

pub mod fallback;
mod listing;
mod product;
mod taxonomy;

pub use listing::{deal_products, ProductFilters, SortOption};
pub use product::{Product, ProductImage, ProductVariant};
pub use taxonomy::{Brand, BrandRef, Category, CategoryRef, TaxonRef};
