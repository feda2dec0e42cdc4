//! Checkout flow state machine.

use std::time::Duration;

use crate::cart::CartStore;
use crate::checkout::address::preselected;
use crate::checkout::confirmation::{estimated_delivery, generate_order_number};
use crate::checkout::{
    Address, CardDetails, Coupon, OrderConfirmation, OrderSummary, PaymentMethod, ShippingMethod,
};
use crate::ids::AddressId;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Where to send a visitor who is not signed in.
pub const LOGIN_REDIRECT: &str = "/login?redirect=checkout";

/// Where to send a visitor whose cart is empty.
pub const CART_REDIRECT: &str = "/cart";

/// How long a shell should wait before following a denial redirect.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(100);

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Shipping address and method.
    Shipping,
    /// Payment details.
    Payment,
    /// Order review before submission.
    Review,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
        }
    }

    fn next(&self) -> Option<Self> {
        match self {
            CheckoutStep::Shipping => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::Review),
            CheckoutStep::Review => None,
        }
    }

    fn previous(&self) -> Option<Self> {
        match self {
            CheckoutStep::Shipping => None,
            CheckoutStep::Payment => Some(CheckoutStep::Shipping),
            CheckoutStep::Review => Some(CheckoutStep::Payment),
        }
    }
}

/// State of one checkout session.
///
/// Lives only as long as the checkout view; nothing here is persisted. The
/// cart is not owned by the flow and is passed in where needed.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    addresses: Vec<Address>,
    shipping_address: Option<AddressId>,
    billing_address: Option<AddressId>,
    billing_same_as_shipping: bool,
    shipping_method: ShippingMethod,
    payment_method: PaymentMethod,
    card: CardDetails,
    coupon: Option<Coupon>,
    placed: bool,
}

impl CheckoutFlow {
    /// Enter checkout.
    ///
    /// Fails with [`CommerceError::CheckoutDenied`] when the visitor is not
    /// signed in or the cart is empty; the error names the page to go to
    /// instead. On success the default address (or the first one) is
    /// preselected for shipping and billing.
    pub fn begin(
        is_authenticated: bool,
        cart: &CartStore,
        addresses: Vec<Address>,
    ) -> Result<Self, CommerceError> {
        if !is_authenticated {
            return Err(CommerceError::CheckoutDenied {
                reason: "sign in to check out".to_string(),
                redirect: LOGIN_REDIRECT,
            });
        }
        if cart.is_empty() {
            return Err(CommerceError::CheckoutDenied {
                reason: "your cart is empty".to_string(),
                redirect: CART_REDIRECT,
            });
        }

        let selected = preselected(&addresses).map(|a| a.id.clone());
        tracing::debug!(addresses = addresses.len(), "checkout started");

        Ok(Self {
            step: CheckoutStep::Shipping,
            shipping_address: selected.clone(),
            billing_address: selected,
            addresses,
            billing_same_as_shipping: true,
            shipping_method: ShippingMethod::default(),
            payment_method: PaymentMethod::default(),
            card: CardDetails::default(),
            coupon: None,
            placed: false,
        })
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The customer's address book.
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Check if an order was placed from this flow.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Check if checkout can advance to a step.
    pub fn can_advance_to(&self, step: CheckoutStep) -> bool {
        self.missing_for_step(step).is_empty()
    }

    /// Advance to the next step.
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.ensure_open()?;
        let next = self
            .step
            .next()
            .ok_or_else(|| CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: "none".to_string(),
            })?;

        let missing = self.missing_for_step(next);
        if !missing.is_empty() {
            return Err(CommerceError::CheckoutIncomplete(missing.join(", ")));
        }

        tracing::debug!(from = self.step.as_str(), to = next.as_str(), "checkout advanced");
        self.step = next;
        Ok(next)
    }

    /// Go back to the previous step.
    pub fn back(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.ensure_open()?;
        let prev = self
            .step
            .previous()
            .ok_or_else(|| CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: "none".to_string(),
            })?;
        self.step = prev;
        Ok(prev)
    }

    /// Go to a specific step: any earlier step, the current one, or the next
    /// one if its requirements are met.
    pub fn go_to(&mut self, step: CheckoutStep) -> Result<(), CommerceError> {
        self.ensure_open()?;
        if step <= self.step {
            self.step = step;
            Ok(())
        } else if self.step.next() == Some(step) {
            self.advance().map(|_| ())
        } else {
            Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: step.as_str().to_string(),
            })
        }
    }

    /// Get what's missing to advance to a step.
    fn missing_for_step(&self, step: CheckoutStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            CheckoutStep::Shipping => {}
            CheckoutStep::Payment => {
                if self.shipping_address().is_none() {
                    missing.push("shipping address");
                }
                if self.billing_address().is_none() {
                    missing.push("billing address");
                }
            }
            CheckoutStep::Review => {
                missing.extend(self.missing_for_step(CheckoutStep::Payment));
                if self.payment_method == PaymentMethod::CreditCard {
                    missing.extend(self.card.missing_fields());
                }
            }
        }
        missing
    }

    /// Select the shipping address by id.
    pub fn select_shipping_address(&mut self, id: &AddressId) -> Result<(), CommerceError> {
        self.ensure_known(id)?;
        self.shipping_address = Some(id.clone());
        Ok(())
    }

    /// Select a separate billing address by id.
    pub fn select_billing_address(&mut self, id: &AddressId) -> Result<(), CommerceError> {
        self.ensure_known(id)?;
        self.billing_address = Some(id.clone());
        self.billing_same_as_shipping = false;
        Ok(())
    }

    /// Set billing same as shipping.
    pub fn set_billing_same_as_shipping(&mut self, same: bool) {
        self.billing_same_as_shipping = same;
    }

    pub fn billing_same_as_shipping(&self) -> bool {
        self.billing_same_as_shipping
    }

    /// The selected shipping address.
    pub fn shipping_address(&self) -> Option<&Address> {
        self.shipping_address.as_ref().and_then(|id| self.find(id))
    }

    /// Get the effective billing address.
    pub fn billing_address(&self) -> Option<&Address> {
        if self.billing_same_as_shipping {
            self.shipping_address()
        } else {
            self.billing_address.as_ref().and_then(|id| self.find(id))
        }
    }

    pub fn set_shipping_method(&mut self, method: ShippingMethod) {
        self.shipping_method = method;
    }

    pub fn shipping_method(&self) -> ShippingMethod {
        self.shipping_method
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Replace the card details.
    pub fn set_card(&mut self, card: CardDetails) {
        self.card = card;
    }

    pub fn card(&self) -> &CardDetails {
        &self.card
    }

    /// Apply a coupon code. An unknown code leaves any applied coupon as is.
    pub fn apply_coupon(&mut self, code: &str) -> Result<&Coupon, CommerceError> {
        let coupon = Coupon::lookup(code)?;
        tracing::debug!(code = %coupon.code, "coupon applied");
        Ok(self.coupon.insert(coupon))
    }

    /// Remove the applied coupon.
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Price breakdown for `cart` with the current selections.
    pub fn summary(&self, cart: &CartStore) -> Result<OrderSummary, CommerceError> {
        OrderSummary::compute(cart.total_price(), self.shipping_method, self.coupon.as_ref())
    }

    /// Place the order.
    ///
    /// Only valid on the review step. No request is sent: the order is
    /// confirmed locally, the cart is cleared and the flow is closed.
    pub fn place_order(&mut self, cart: &mut CartStore) -> Result<OrderConfirmation, CommerceError> {
        self.ensure_open()?;
        if self.step != CheckoutStep::Review {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: "placed".to_string(),
            });
        }
        if cart.is_empty() {
            return Err(CommerceError::CheckoutIncomplete("cart items".to_string()));
        }

        let missing = self.missing_for_step(CheckoutStep::Review);
        let (shipping_address, billing_address) =
            match (self.shipping_address(), self.billing_address()) {
                (Some(shipping), Some(billing)) if missing.is_empty() => {
                    (shipping.clone(), billing.clone())
                }
                _ => return Err(CommerceError::CheckoutIncomplete(missing.join(", "))),
            };

        let summary = self.summary(cart)?;
        let placed_at = chrono::Utc::now();
        let confirmation = OrderConfirmation {
            order_number: generate_order_number(),
            placed_at,
            items: cart.items().to_vec(),
            summary,
            shipping_address,
            billing_address,
            shipping_method: self.shipping_method,
            payment_method: self.payment_method,
            estimated_delivery: estimated_delivery(placed_at, self.shipping_method),
        };

        cart.clear_cart();
        self.placed = true;
        tracing::info!(
            order_number = %confirmation.order_number,
            total = %confirmation.summary.total,
            "order placed"
        );
        Ok(confirmation)
    }

    fn ensure_open(&self) -> Result<(), CommerceError> {
        if self.placed {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: "placed".to_string(),
                to: self.step.as_str().to_string(),
            });
        }
        Ok(())
    }

    fn ensure_known(&self, id: &AddressId) -> Result<(), CommerceError> {
        match self.find(id) {
            Some(_) => Ok(()),
            None => Err(CommerceError::ValidationError(format!("unknown address {}", id))),
        }
    }

    fn find(&self, id: &AddressId) -> Option<&Address> {
        self.addresses.iter().find(|a| &a.id == id)
    }
}
