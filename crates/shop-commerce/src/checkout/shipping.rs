//! Shipping method options.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A shipping method offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
}

impl ShippingMethod {
    /// Every method, in display order.
    pub const ALL: [ShippingMethod; 2] = [ShippingMethod::Standard, ShippingMethod::Express];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "standard",
            ShippingMethod::Express => "express",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Some(ShippingMethod::Standard),
            "express" => Some(ShippingMethod::Express),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "Standard Shipping",
            ShippingMethod::Express => "Express Shipping",
        }
    }

    /// Flat shipping rate.
    pub fn price(&self) -> Money {
        match self {
            ShippingMethod::Standard => Money::new(500, Currency::USD),
            ShippingMethod::Express => Money::new(1500, Currency::USD),
        }
    }

    /// Business days until delivery, `(min, max)`.
    pub fn delivery_days(&self) -> (u32, u32) {
        match self {
            ShippingMethod::Standard => (3, 5),
            ShippingMethod::Express => (1, 2),
        }
    }

    /// Get delivery estimate string.
    pub fn delivery_estimate(&self) -> String {
        let (min, max) = self.delivery_days();
        format!("{}-{} business days", min, max)
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.delivery_estimate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        assert_eq!(ShippingMethod::Standard.price().amount_cents, 500);
        assert_eq!(ShippingMethod::Express.price().amount_cents, 1500);
        assert_eq!(ShippingMethod::default(), ShippingMethod::Standard);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ShippingMethod::Express.to_string(),
            "Express Shipping (1-2 business days)"
        );
        assert_eq!(ShippingMethod::from_str("STANDARD"), Some(ShippingMethod::Standard));
        assert_eq!(ShippingMethod::from_str("overnight"), None);
    }
}
