//! Order summary arithmetic and coupons.

use crate::checkout::ShippingMethod;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Sales tax rate applied to the subtotal, in percent.
pub const TAX_RATE_PERCENT: f64 = 7.0;

/// A coupon accepted at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Code as the customer typed it.
    pub code: String,
    /// Discount on the subtotal, in percent.
    pub percent_off: f64,
}

impl Coupon {
    /// Look up a coupon code. Codes are case-insensitive.
    pub fn lookup(code: &str) -> Result<Self, CommerceError> {
        let trimmed = code.trim();
        match trimmed.to_lowercase().as_str() {
            "discount10" => Ok(Coupon {
                code: trimmed.to_string(),
                percent_off: 10.0,
            }),
            _ => Err(CommerceError::InvalidCoupon(trimmed.to_string())),
        }
    }

    /// Discount this coupon gives on `subtotal`.
    pub fn discount(&self, subtotal: Money) -> Money {
        subtotal.percentage(self.percent_off)
    }
}

/// Price breakdown shown beside every checkout step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Cart total.
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub discount: Money,
    /// `subtotal + shipping + tax - discount`.
    pub total: Money,
}

impl OrderSummary {
    /// Compute the summary for a cart subtotal.
    pub fn compute(
        subtotal: Money,
        shipping_method: ShippingMethod,
        coupon: Option<&Coupon>,
    ) -> Result<Self, CommerceError> {
        let currency = subtotal.currency;
        let shipping = Money::new(shipping_method.price().amount_cents, currency);
        let tax = subtotal.percentage(TAX_RATE_PERCENT);
        let discount = coupon
            .map(|c| c.discount(subtotal))
            .unwrap_or_else(|| Money::zero(currency));

        let total = subtotal
            .try_add(&shipping)
            .and_then(|sum| sum.try_add(&tax))
            .and_then(|sum| sum.try_subtract(&discount))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            shipping,
            tax,
            discount,
            total,
        })
    }

    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }
}
