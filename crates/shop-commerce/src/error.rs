//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// The operation exists in the UI but has no behavior yet.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Checkout cannot start; the shell should navigate to `redirect`.
    #[error("Checkout unavailable: {reason}")]
    CheckoutDenied {
        reason: String,
        redirect: &'static str,
    },

    /// Invalid coupon code.
    #[error("Invalid coupon code: {0}")]
    InvalidCoupon(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Storage error.
    #[cfg(feature = "storage")]
    #[error("Storage error: {0}")]
    Storage(#[from] shop_store::StoreError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
