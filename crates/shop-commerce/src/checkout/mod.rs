//! Checkout module.
//!
//! Contains the three-step checkout flow, address book entries, shipping
//! and payment options, the order summary and the confirmation record.

mod address;
mod confirmation;
mod flow;
mod payment;
mod shipping;
mod summary;

pub use address::{preselected, Address};
pub use confirmation::OrderConfirmation;
pub use flow::{CheckoutFlow, CheckoutStep, CART_REDIRECT, LOGIN_REDIRECT, REDIRECT_DELAY};
pub use payment::{CardDetails, PaymentMethod};
pub use shipping::ShippingMethod;
pub use summary::{Coupon, OrderSummary, TAX_RATE_PERCENT};
