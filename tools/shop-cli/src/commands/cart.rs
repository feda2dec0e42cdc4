//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use shop_commerce::cart::CartStore;
use shop_commerce::{CommerceError, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::dollars;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.load_cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {
            show(&cart, ctx);
            return Ok(());
        }
        CartCommand::Add { slug, quantity } => {
            if quantity <= 0 {
                bail!("Quantity must be at least 1");
            }
            let spinner = ctx.output.spinner("Looking up product...");
            let product = ctx.catalog().product(&slug).await;
            spinner.finish_and_clear();

            ctx.output.source_notice(product.source);
            if product.value.slug != slug {
                bail!("Product not found: {}", slug);
            }
            cart.add_item(product.value.to_cart_item(quantity));
            ctx.output
                .success(&format!("Added {} x {}", quantity, product.value.name));
        }
        CartCommand::Set { id, quantity } => {
            let id = existing_line(&cart, &id)?;
            cart.update_item_quantity(&id, quantity);
            if quantity <= 0 {
                ctx.output.success(&format!("Removed {}", id));
            } else {
                ctx.output.success(&format!("Set {} to {}", id, quantity));
            }
        }
        CartCommand::Inc { id } => {
            let id = existing_line(&cart, &id)?;
            let current = cart.get_item(&id).map(|i| i.quantity).unwrap_or(0);
            cart.update_item_quantity(&id, current.saturating_add(1));
        }
        CartCommand::Dec { id } => {
            let id = existing_line(&cart, &id)?;
            let current = cart.get_item(&id).map(|i| i.quantity).unwrap_or(0);
            cart.update_item_quantity(&id, current - 1);
        }
        CartCommand::Remove { id } => {
            let id = existing_line(&cart, &id)?;
            cart.remove_item(&id);
            ctx.output.success(&format!("Removed {}", id));
        }
        CartCommand::Clear { yes } => {
            if cart.is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt("Remove every item from the cart?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cart left unchanged");
                    return Ok(());
                }
            }
            cart.clear_cart();
            ctx.output.success("Cart cleared");
        }
        CartCommand::SaveForLater { id } => match cart.save_for_later(&ProductId::new(id)) {
            Err(CommerceError::NotImplemented(feature)) => {
                ctx.output
                    .warn(&format!("Sorry, {} is not available yet", feature));
                return Ok(());
            }
            Err(e) => return Err(e.into()),
            Ok(()) => {}
        },
    }

    ctx.save_cart(&cart)?;
    show(&cart, ctx);
    Ok(())
}

fn existing_line(cart: &CartStore, id: &str) -> Result<ProductId> {
    let id = ProductId::new(id);
    if cart.get_item(&id).is_none() {
        bail!("No item with id {} in the cart", id);
    }
    Ok(id)
}

/// Print the cart, or its snapshot in JSON mode.
pub(crate) fn show(cart: &CartStore, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&cart.snapshot());
        return;
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [16, 30, 10, 5, 12];
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "QTY", "LINE TOTAL"], &widths);
    for item in cart.items() {
        ctx.output.table_row(
            &[
                item.id.as_str(),
                &item.name,
                &dollars(item.price),
                &item.quantity.to_string(),
                &dollars(item.line_total()),
            ],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output.kv("items", &cart.total_items().to_string());
    ctx.output.kv("subtotal", &dollars(cart.total_price()));
}
