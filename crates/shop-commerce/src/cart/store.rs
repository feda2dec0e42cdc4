//! The cart store: items plus derived totals.

use crate::cart::item::clamp_quantity;
use crate::cart::{CartItem, CartTotals, PersistedCart, MAX_QUANTITY_PER_ITEM};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Client-side shopping cart.
///
/// Holds line items in insertion order. Totals are never stored; every read
/// recomputes them from the items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a cart from its persisted form.
    ///
    /// The stored totals are ignored and lines with a non-positive quantity
    /// are dropped.
    pub fn from_snapshot(snapshot: PersistedCart) -> Self {
        let items = snapshot
            .items
            .into_iter()
            .filter(|item| item.quantity > 0)
            .map(|mut item| {
                item.quantity = item.quantity.min(MAX_QUANTITY_PER_ITEM);
                item.price = item.price.non_negative();
                item
            })
            .collect();
        Self { items }
    }

    /// The persisted form of this cart, totals included.
    pub fn snapshot(&self) -> PersistedCart {
        PersistedCart {
            items: self.items.clone(),
            cart: self.totals(),
        }
    }

    /// Add an item.
    ///
    /// If a line with the same id exists its quantity grows by the incoming
    /// quantity (capped at [`MAX_QUANTITY_PER_ITEM`]); the existing name and
    /// price are kept. Otherwise the item is appended.
    pub fn add_item(&mut self, item: CartItem) {
        let quantity = clamp_quantity(item.quantity);

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing
                .quantity
                .saturating_add(quantity)
                .min(MAX_QUANTITY_PER_ITEM);
            tracing::debug!(id = %item.id, quantity = existing.quantity, "cart line merged");
            return;
        }

        tracing::debug!(id = %item.id, quantity, "cart line added");
        self.items.push(CartItem {
            quantity,
            price: item.price.non_negative(),
            ..item
        });
    }

    /// Set the quantity of a line. A quantity of zero or less removes it.
    ///
    /// Unknown ids are ignored.
    pub fn update_item_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.id == id) {
            item.quantity = quantity.min(MAX_QUANTITY_PER_ITEM);
            tracing::debug!(%id, quantity = item.quantity, "cart line updated");
        }
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &ProductId) {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        if self.items.len() < len_before {
            tracing::debug!(%id, "cart line removed");
        }
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        tracing::debug!("cart cleared");
    }

    /// Move a line to a saved-for-later list.
    ///
    /// There is no saved list yet, so this always fails and leaves the cart
    /// untouched.
    pub fn save_for_later(&mut self, id: &ProductId) -> Result<(), CommerceError> {
        if self.get_item(id).is_none() {
            return Err(CommerceError::ItemNotInCart(id.to_string()));
        }
        tracing::warn!(%id, "save for later requested but not supported");
        Err(CommerceError::NotImplemented("save for later"))
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> i64 {
        self.totals().total_items
    }

    /// Sum of price times quantity.
    pub fn total_price(&self) -> Money {
        self.totals().total_price
    }

    /// Both totals at once.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_items(&self.items)
    }

    /// Recompute totals, e.g. after restoring a record written by another
    /// client.
    pub fn refresh(&self) -> CartTotals {
        let totals = self.totals();
        tracing::debug!(
            total_items = totals.total_items,
            total_price = %totals.total_price,
            "cart totals refreshed"
        );
        totals
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get a line by id.
    pub fn get_item(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    fn sample_cart() -> CartStore {
        let mut cart = CartStore::new();
        cart.add_item(CartItem::new("a", "Item A", 10.0, "", 2));
        cart.add_item(CartItem::new("b", "Item B", 5.0, "", 1));
        cart
    }

    #[test]
    fn test_totals() {
        let cart = sample_cart();
        assert_eq!(cart.total_price().amount_cents, 2500);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_total_price_uses_line_currency() {
        let cart = sample_cart();
        let total = cart.total_price();
        assert!(cart.items().iter().all(|i| i.price.currency == total.currency));
        assert_eq!(total.to_string(), "$25.00");
    }

    #[test]
    fn test_negative_update_removes() {
        let mut cart = sample_cart();
        cart.update_item_quantity(&id("a"), -1);
        assert!(cart.get_item(&id("a")).is_none());
        assert_eq!(cart.total_price().amount_cents, 500);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_zero_update_removes_then_noop() {
        let mut cart = sample_cart();
        cart.update_item_quantity(&id("b"), 0);
        let after_first = cart.clone();
        cart.update_item_quantity(&id("b"), 0);
        assert_eq!(cart, after_first);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_add_twice_merges() {
        let mut cart = CartStore::new();
        cart.add_item(CartItem::new("x", "X", 3.0, "", 1));
        cart.add_item(CartItem::new("x", "X", 3.0, "", 2));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get_item(&id("x")).unwrap().quantity, 3);
    }

    #[test]
    fn test_merge_keeps_existing_name_and_price() {
        let mut cart = CartStore::new();
        cart.add_item(CartItem::new("x", "Original", 3.0, "", 1));
        cart.add_item(CartItem::new("x", "Renamed", 99.0, "", 1));
        let line = cart.get_item(&id("x")).unwrap();
        assert_eq!(line.name, "Original");
        assert_eq!(line.price.amount_cents, 300);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_add_zero_quantity_counts_as_one() {
        let mut cart = CartStore::new();
        cart.add_item(CartItem {
            quantity: 0,
            ..CartItem::new("x", "X", 1.0, "", 1)
        });
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_quantity_is_capped() {
        let mut cart = CartStore::new();
        cart.add_item(CartItem::new("x", "X", 1.0, "", MAX_QUANTITY_PER_ITEM));
        cart.add_item(CartItem::new("x", "X", 1.0, "", 10));
        assert_eq!(cart.total_items(), MAX_QUANTITY_PER_ITEM);

        cart.update_item_quantity(&id("x"), i64::MAX);
        assert_eq!(cart.total_items(), MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut cart = sample_cart();
        let before = cart.clone();
        cart.update_item_quantity(&id("zzz"), 4);
        cart.remove_item(&id("zzz"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = sample_cart();
        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_malformed_price_counts_as_zero() {
        let mut cart = CartStore::new();
        cart.add_item(CartItem::new("x", "X", "not a price", "", 4));
        cart.add_item(CartItem::new("y", "Y", 2.5, "", 2));
        assert_eq!(cart.total_price().amount_cents, 500);
    }

    #[test]
    fn test_save_for_later_is_not_implemented() {
        let mut cart = sample_cart();
        let before = cart.clone();
        assert!(matches!(
            cart.save_for_later(&id("a")),
            Err(CommerceError::NotImplemented(_))
        ));
        assert!(matches!(
            cart.save_for_later(&id("missing")),
            Err(CommerceError::ItemNotInCart(_))
        ));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_snapshot_restores_and_recomputes() {
        let cart = sample_cart();
        let mut snapshot = cart.snapshot();
        assert_eq!(snapshot.cart.total_items, 3);

        // Stale totals and a zero-quantity line in the stored record
        snapshot.cart.total_items = 42;
        snapshot.items.push(CartItem {
            quantity: 0,
            ..CartItem::new("z", "Z", 1.0, "", 1)
        });

        let restored = CartStore::from_snapshot(snapshot);
        assert_eq!(restored.total_items(), 3);
        assert_eq!(restored.refresh().total_price.amount_cents, 2500);
        assert!(restored.get_item(&id("z")).is_none());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8, i64, i64),
        Update(u8, i64),
        Remove(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..4, 0i64..100_000, -2i64..20).prop_map(|(k, cents, q)| Op::Add(k, cents, q)),
            (0u8..4, -3i64..20).prop_map(|(k, q)| Op::Update(k, q)),
            (0u8..4).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_totals_match_items(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let mut cart = CartStore::new();
            for op in ops {
                match op {
                    Op::Add(k, cents, q) => cart.add_item(CartItem {
                        quantity: q,
                        ..CartItem::new(format!("p{k}"), "P", cents as f64 / 100.0, "", 1)
                    }),
                    Op::Update(k, q) => cart.update_item_quantity(&ProductId::new(format!("p{k}")), q),
                    Op::Remove(k) => cart.remove_item(&ProductId::new(format!("p{k}"))),
                }

                prop_assert!(cart.items().iter().all(|i| i.quantity >= 1));
                let items: i64 = cart.items().iter().map(|i| i.quantity).sum();
                let cents: i64 = cart
                    .items()
                    .iter()
                    .map(|i| i.price.amount_cents * i.quantity)
                    .sum();
                prop_assert_eq!(cart.total_items(), items);
                prop_assert_eq!(cart.total_price().amount_cents, cents);
            }
        }
    }
}
