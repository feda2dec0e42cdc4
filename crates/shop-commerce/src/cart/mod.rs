//! Shopping cart module.
//!
//! Contains the cart store, line items and derived totals.

mod item;
#[cfg(feature = "storage")]
mod persist;
mod store;
mod totals;

pub use item::{CartItem, MAX_QUANTITY_PER_ITEM};
pub use store::CartStore;
pub use totals::{CartTotals, PersistedCart};
