//! Interactive checkout: shipping, payment, review.

use anyhow::{anyhow, bail, Result};
use dialoguer::{Confirm, Input, Password, Select};
use shop_commerce::cart::CartStore;
use shop_commerce::checkout::{
    CardDetails, CheckoutFlow, CheckoutStep, OrderConfirmation, PaymentMethod, ShippingMethod,
    CART_REDIRECT, LOGIN_REDIRECT,
};
use shop_commerce::{AddressId, CommerceError};

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::dollars;

const STEPS: u8 = 3;

/// What to run instead when checkout is refused.
fn redirect_hint(redirect: &str) -> &'static str {
    match redirect {
        LOGIN_REDIRECT => "run `shop login`, then `shop checkout` again",
        CART_REDIRECT => "add something with `shop cart add <slug>`",
        _ => "see `shop --help`",
    }
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let auth = ctx.auth()?;
    let mut cart = ctx.load_cart()?;
    let interactive = !args.yes && !ctx.output.is_json();

    let mut flow = match CheckoutFlow::begin(
        auth.is_authenticated(),
        &cart,
        ctx.config.addresses.clone(),
    ) {
        Ok(flow) => flow,
        Err(CommerceError::CheckoutDenied { reason, redirect }) => {
            bail!("Cannot check out: {} ({})", reason, redirect_hint(redirect))
        }
        Err(e) => return Err(e.into()),
    };

    if flow.addresses().is_empty() {
        bail!("No saved addresses. Add an [[addresses]] entry to shop.toml (see `shop config init`).");
    }

    apply_flags(&mut flow, &args)?;

    while !flow.is_placed() {
        match flow.step() {
            CheckoutStep::Shipping => {
                ctx.output.step(1, STEPS, CheckoutStep::Shipping.display_name());
                if interactive {
                    prompt_shipping(&mut flow)?;
                }
                advance(&mut flow, interactive, ctx)?;
            }
            CheckoutStep::Payment => {
                ctx.output.step(2, STEPS, CheckoutStep::Payment.display_name());
                if interactive {
                    prompt_payment(&mut flow)?;
                }
                advance(&mut flow, interactive, ctx)?;
            }
            CheckoutStep::Review => {
                ctx.output.step(3, STEPS, CheckoutStep::Review.display_name());
                print_review(&flow, &cart, ctx)?;

                if interactive {
                    let choice = Select::new()
                        .with_prompt("Next")
                        .items(&["Place order", "Apply coupon", "Back to payment", "Cancel"])
                        .default(0)
                        .interact()?;
                    match choice {
                        0 => {}
                        1 => {
                            prompt_coupon(&mut flow, ctx)?;
                            continue;
                        }
                        2 => {
                            flow.back()?;
                            continue;
                        }
                        _ => {
                            ctx.output.warn("Checkout cancelled; your cart is unchanged");
                            return Ok(());
                        }
                    }
                }

                let confirmation = flow.place_order(&mut cart)?;
                ctx.save_cart(&cart)?;
                print_confirmation(&confirmation, ctx);
            }
        }
    }

    Ok(())
}

/// Apply the non-interactive flags to the flow.
fn apply_flags(flow: &mut CheckoutFlow, args: &CheckoutArgs) -> Result<()> {
    if let Some(id) = &args.address {
        flow.select_shipping_address(&AddressId::new(id.as_str()))?;
    }
    if let Some(id) = &args.billing_address {
        flow.set_billing_same_as_shipping(false);
        flow.select_billing_address(&AddressId::new(id.as_str()))?;
    }
    if let Some(method) = &args.shipping {
        let method = ShippingMethod::from_str(method)
            .ok_or_else(|| anyhow!("Unknown shipping method: {} (standard, express)", method))?;
        flow.set_shipping_method(method);
    }
    if let Some(method) = &args.payment {
        let method = PaymentMethod::from_str(method)
            .ok_or_else(|| anyhow!("Unknown payment method: {} (credit_card, paypal)", method))?;
        flow.set_payment_method(method);
    }

    let card = CardDetails {
        number: args.card_number.clone().unwrap_or_default(),
        name: args.card_name.clone().unwrap_or_default(),
        expiry: args.card_expiry.clone().unwrap_or_default(),
        cvc: args.card_cvc.clone().unwrap_or_default(),
    };
    if card != CardDetails::default() {
        flow.set_card(card);
    }

    if let Some(code) = &args.coupon {
        flow.apply_coupon(code)?;
    }
    Ok(())
}

/// Move to the next step, explaining what is missing when that fails.
fn advance(flow: &mut CheckoutFlow, interactive: bool, ctx: &Context) -> Result<()> {
    match flow.advance() {
        Ok(_) => Ok(()),
        Err(CommerceError::CheckoutIncomplete(missing)) if interactive => {
            ctx.output.warn(&format!("Still needed: {}", missing));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn prompt_shipping(flow: &mut CheckoutFlow) -> Result<()> {
    let addresses = flow.addresses().to_vec();
    let labels: Vec<String> = addresses.iter().map(|a| a.one_line()).collect();
    let current = flow
        .shipping_address()
        .and_then(|s| addresses.iter().position(|a| a.id == s.id))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Ship to")
        .items(&labels)
        .default(current)
        .interact()?;
    flow.select_shipping_address(&addresses[selection].id)?;

    let methods: Vec<String> = ShippingMethod::ALL
        .iter()
        .map(|m| format!("{} - {}", m, dollars(m.price())))
        .collect();
    let current = ShippingMethod::ALL
        .iter()
        .position(|m| *m == flow.shipping_method())
        .unwrap_or(0);
    let selection = Select::new()
        .with_prompt("Shipping method")
        .items(&methods)
        .default(current)
        .interact()?;
    flow.set_shipping_method(ShippingMethod::ALL[selection]);

    let same = Confirm::new()
        .with_prompt("Bill to the same address?")
        .default(flow.billing_same_as_shipping())
        .interact()?;
    flow.set_billing_same_as_shipping(same);
    if !same {
        let selection = Select::new()
            .with_prompt("Bill to")
            .items(&labels)
            .default(current_billing(flow, &addresses))
            .interact()?;
        flow.select_billing_address(&addresses[selection].id)?;
    }
    Ok(())
}

fn current_billing(flow: &CheckoutFlow, addresses: &[shop_commerce::checkout::Address]) -> usize {
    flow.billing_address()
        .and_then(|b| addresses.iter().position(|a| a.id == b.id))
        .unwrap_or(0)
}

fn prompt_payment(flow: &mut CheckoutFlow) -> Result<()> {
    let methods = [PaymentMethod::CreditCard, PaymentMethod::Paypal];
    let labels: Vec<&str> = methods.iter().map(|m| m.display_name()).collect();
    let current = methods
        .iter()
        .position(|m| *m == flow.payment_method())
        .unwrap_or(0);
    let selection = Select::new()
        .with_prompt("Pay with")
        .items(&labels)
        .default(current)
        .interact()?;
    flow.set_payment_method(methods[selection]);

    if flow.payment_method() == PaymentMethod::CreditCard {
        let existing = flow.card().clone();
        let card = CardDetails {
            number: Input::<String>::new()
                .with_prompt("Card number")
                .with_initial_text(existing.number)
                .allow_empty(true)
                .interact_text()?,
            name: Input::<String>::new()
                .with_prompt("Name on card")
                .with_initial_text(existing.name)
                .allow_empty(true)
                .interact_text()?,
            expiry: Input::<String>::new()
                .with_prompt("Expiry (MM/YY)")
                .with_initial_text(existing.expiry)
                .allow_empty(true)
                .interact_text()?,
            cvc: Password::new()
                .with_prompt("CVC")
                .allow_empty_password(true)
                .interact()?,
        };
        flow.set_card(card);
    }
    Ok(())
}

fn prompt_coupon(flow: &mut CheckoutFlow, ctx: &Context) -> Result<()> {
    let code: String = Input::new()
        .with_prompt("Coupon code")
        .allow_empty(true)
        .interact_text()?;
    if code.trim().is_empty() {
        flow.remove_coupon();
        ctx.output.info("Coupon removed");
        return Ok(());
    }

    match flow.apply_coupon(&code) {
        Ok(coupon) => ctx
            .output
            .success(&format!("Applied {} ({}% off)", coupon.code, coupon.percent_off)),
        Err(CommerceError::InvalidCoupon(code)) => {
            ctx.output.warn(&format!("Invalid coupon code: {}", code))
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn print_review(flow: &CheckoutFlow, cart: &CartStore, ctx: &Context) -> Result<()> {
    let summary = flow.summary(cart)?;

    if ctx.output.is_json() {
        return Ok(());
    }

    for item in cart.items() {
        ctx.output.list_item(&format!(
            "{} x {} - {}",
            item.quantity,
            item.name,
            dollars(item.line_total())
        ));
    }
    if let Some(address) = flow.shipping_address() {
        ctx.output.kv("ship to", &address.one_line());
    }
    if let Some(address) = flow.billing_address() {
        ctx.output.kv("bill to", &address.one_line());
    }
    ctx.output.kv("shipping", &flow.shipping_method().to_string());
    let payment = match flow.payment_method() {
        PaymentMethod::CreditCard => format!("Card {}", flow.card().masked_number()),
        PaymentMethod::Paypal => PaymentMethod::Paypal.display_name().to_string(),
    };
    ctx.output.kv("payment", &payment);

    ctx.output.info("");
    ctx.output.kv("subtotal", &dollars(summary.subtotal));
    ctx.output.kv("shipping", &dollars(summary.shipping));
    ctx.output.kv("tax", &dollars(summary.tax));
    if summary.has_discount() {
        ctx.output.kv("discount", &format!("-{}", dollars(summary.discount)));
    }
    ctx.output.kv("total", &dollars(summary.total));
    Ok(())
}

fn print_confirmation(confirmation: &OrderConfirmation, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(confirmation);
        return;
    }

    ctx.output.success(&format!(
        "Order {} placed",
        confirmation.order_number
    ));
    ctx.output
        .kv("items", &confirmation.item_count().to_string());
    ctx.output.kv("total", &dollars(confirmation.summary.total));
    ctx.output.kv(
        "arrives by",
        &confirmation.estimated_delivery.format("%A, %B %-d").to_string(),
    );
}
