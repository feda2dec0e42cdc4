//! The record shown once an order is placed.

use crate::cart::CartItem;
use crate::checkout::{Address, OrderSummary, PaymentMethod, ShippingMethod};
use crate::ids::OrderId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A placed order, as shown on the confirmation page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    /// Order number, `ORD-` followed by six digits.
    pub order_number: OrderId,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<CartItem>,
    pub summary: OrderSummary,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    /// Last day of the delivery window.
    pub estimated_delivery: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Number of units ordered.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Delivery estimate for an order placed at `placed_at`.
pub(crate) fn estimated_delivery(placed_at: DateTime<Utc>, method: ShippingMethod) -> DateTime<Utc> {
    let (_, max_days) = method.delivery_days();
    placed_at + Duration::days(i64::from(max_days))
}

/// Generate an order number of the form `ORD-000000`.
pub(crate) fn generate_order_number() -> OrderId {
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = Utc::now().timestamp_subsec_nanos() as u64;
    let seconds = Utc::now().timestamp() as u64;
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    let n = (seconds.wrapping_mul(1_000_003) ^ nanos).wrapping_add(counter) % 1_000_000;
    OrderId::new(format!("ORD-{:06}", n))
}
