//! Cart line items.

use crate::ids::ProductId;
use crate::money::Money;
use crate::price::{self, PriceInput};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A product line in the cart.
///
/// The line is keyed by product id; adding the same product again merges
/// into the existing line. `quantity` is always at least 1 while the item is
/// in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product identifier.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price, normalized to a non-negative amount.
    #[serde(with = "price::lenient")]
    pub price: Money,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Quantity.
    pub quantity: i64,
}

impl CartItem {
    /// Create a line item.
    ///
    /// The price is coerced through [`price::parse_price`], so a malformed or
    /// negative price becomes zero. The quantity is clamped into
    /// `1..=MAX_QUANTITY_PER_ITEM`.
    pub fn new<'a>(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: impl Into<PriceInput<'a>>,
        image: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price::parse_price(price),
            image: image.into(),
            quantity: clamp_quantity(quantity),
        }
    }

    /// Line total (unit price times quantity), saturating on overflow.
    pub fn line_total(&self) -> Money {
        self.price.saturating_multiply(self.quantity)
    }
}

/// Clamp a requested quantity into the range a cart line may hold.
pub(crate) fn clamp_quantity(quantity: i64) -> i64 {
    quantity.clamp(1, MAX_QUANTITY_PER_ITEM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_price() {
        assert_eq!(CartItem::new("a", "A", "12.50", "", 1).price.amount_cents, 1250);
        assert!(CartItem::new("a", "A", "n/a", "", 1).price.is_zero());
        assert!(CartItem::new("a", "A", -4.0, "", 1).price.is_zero());
        assert!(CartItem::new("a", "A", None::<f64>, "", 1).price.is_zero());
    }

    #[test]
    fn test_new_clamps_quantity() {
        assert_eq!(CartItem::new("a", "A", 1.0, "", 0).quantity, 1);
        assert_eq!(CartItem::new("a", "A", 1.0, "", -3).quantity, 1);
        assert_eq!(
            CartItem::new("a", "A", 1.0, "", MAX_QUANTITY_PER_ITEM + 5).quantity,
            MAX_QUANTITY_PER_ITEM
        );
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::new("a", "A", 10.0, "", 3);
        assert_eq!(item.line_total().amount_cents, 3000);
    }

    #[test]
    fn test_deserialize_string_price() {
        let item: CartItem = serde_json::from_str(
            r#"{"id": 7, "name": "Mouse", "price": "19.99", "image": "/m.png", "quantity": 2}"#,
        )
        .unwrap();
        assert_eq!(item.id.as_str(), "7");
        assert_eq!(item.price.amount_cents, 1999);
    }
}
