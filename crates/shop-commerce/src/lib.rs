//! Storefront domain types and client-side logic.
//!
//! This crate holds everything the storefront computes locally:
//!
//! - **Cart**: line items, derived totals, persistence under `cart-storage`
//! - **Catalog**: products, categories, brands, fallback data, listing filters
//! - **Checkout**: the Shipping → Payment → Review flow and order summary
//! - **Deals**: featured promotions and countdowns
//! - **Price**: lenient price coercion and formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_commerce::prelude::*;
//!
//! let mut cart = CartStore::load(&cache)?;
//! cart.add_item(product.to_cart_item(1));
//! cart.save(&cache)?;
//!
//! println!("{} items, ${}", cart.total_items(), format_price(cart.total_price()));
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod price;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod deals;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::price::{format_price, parse_price, PriceInput};

    // Cart
    pub use crate::cart::{CartItem, CartStore, CartTotals, PersistedCart, MAX_QUANTITY_PER_ITEM};

    // Catalog
    pub use crate::catalog::{
        deal_products, fallback, Brand, Category, Product, ProductFilters, ProductImage,
        ProductVariant, SortOption,
    };

    // Checkout
    pub use crate::checkout::{
        Address, CardDetails, CheckoutFlow, CheckoutStep, Coupon, OrderConfirmation,
        OrderSummary, PaymentMethod, ShippingMethod,
    };

    // Deals
    pub use crate::deals::{featured_deals, Deal, TimeLeft};
}
