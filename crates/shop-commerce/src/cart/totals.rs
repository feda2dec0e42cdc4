//! Derived cart totals and the persisted cart shape.

use crate::cart::CartItem;
use crate::money::{Currency, Money};
use crate::price;
use serde::{Deserialize, Serialize};

/// Totals derived from a list of cart items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CartTotals {
    /// Sum of quantities.
    pub total_items: i64,
    /// Sum of price times quantity.
    #[serde(with = "price::lenient")]
    pub total_price: Money,
}

impl CartTotals {
    /// Compute totals from items. Sums saturate instead of overflowing.
    ///
    /// Every line is priced in [`Currency::USD`] by [`price::parse_price`].
    pub fn from_items(items: &[CartItem]) -> Self {
        let total_items = items
            .iter()
            .fold(0_i64, |acc, item| acc.saturating_add(item.quantity));
        let total_cents = items
            .iter()
            .fold(0_i64, |acc, item| acc.saturating_add(item.line_total().amount_cents));

        Self {
            total_items,
            total_price: Money::new(total_cents, Currency::USD),
        }
    }
}

/// The cart as written under the `cart-storage` key.
///
/// `cart` is kept for readers of the stored record; it is recomputed from
/// `items` whenever the record is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PersistedCart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub cart: CartTotals,
}
