//! Cart persistence under the `cart-storage` key.

use shop_store::{Cache, Record, CART_STORAGE_KEY};

use crate::cart::{CartStore, PersistedCart};
use crate::error::CommerceError;

impl CartStore {
    /// The persisted cart record in `cache`.
    pub fn record(cache: &Cache) -> Record<PersistedCart> {
        Record::new(cache.clone(), CART_STORAGE_KEY)
    }

    /// Load the persisted cart, or an empty cart when none was saved.
    pub fn load(cache: &Cache) -> Result<Self, CommerceError> {
        let snapshot = Self::record(cache).load_or_default()?;
        let cart = Self::from_snapshot(snapshot);
        tracing::debug!(lines = cart.items().len(), "cart restored");
        Ok(cart)
    }

    /// Write the cart, with freshly computed totals.
    pub fn save(&self, cache: &Cache) -> Result<(), CommerceError> {
        Self::record(cache).save(&self.snapshot())?;
        Ok(())
    }
}
