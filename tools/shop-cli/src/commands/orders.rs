//! Order history.

use anyhow::{bail, Result};
use shop_api::{FetchError, Order};
use shop_commerce::OrderId;

use super::OrdersArgs;
use crate::context::Context;
use crate::output::{dollars, status_badge};

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let auth = ctx.auth()?;
    if !auth.is_authenticated() {
        bail!("Sign in with `shop login` to see your orders");
    }

    let orders = ctx.orders();
    let spinner = ctx.output.spinner("Loading orders...");
    let result = match &args.number {
        Some(number) => orders
            .order(&OrderId::new(number.as_str()))
            .await
            .map(|order| vec![order]),
        None => orders
            .orders(args.page, args.page_size)
            .await
            .map(|page| page.results),
    };
    spinner.finish_and_clear();

    let list = match result {
        Ok(list) => list,
        Err(e) if e.is_auth_rejection() => {
            bail!("Your session has expired; run `shop login` again")
        }
        Err(FetchError::HttpError { status: 404, .. }) => {
            bail!("Order not found")
        }
        Err(e) => return Err(e.into()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&list);
        return Ok(());
    }

    match &args.number {
        Some(_) => {
            for order in &list {
                print_order(order, ctx);
            }
        }
        None => {
            ctx.output.header(&format!("Orders (page {})", args.page));
            if list.is_empty() {
                ctx.output.info("No orders yet");
            }
            let widths = [12, 12, 10, 12, 20];
            ctx.output
                .table_row(&["NUMBER", "STATUS", "ITEMS", "TOTAL", "PLACED"], &widths);
            for order in &list {
                ctx.output.table_row(
                    &[
                        order.order_number.as_str(),
                        &status_badge(&order.status),
                        &order.item_count().to_string(),
                        &dollars(order.total),
                        &order.created_at,
                    ],
                    &widths,
                );
            }
        }
    }
    Ok(())
}

fn print_order(order: &Order, ctx: &Context) {
    ctx.output.header(&format!("Order {}", order.order_number));
    ctx.output.kv("status", &status_badge(&order.status));
    if !order.payment_status.is_empty() {
        ctx.output.kv("payment", &status_badge(&order.payment_status));
    }
    ctx.output.kv("placed", &order.created_at);
    for item in &order.items {
        ctx.output.list_item(&format!(
            "{} x {} - {}",
            item.quantity,
            item.display_name(),
            dollars(item.total_price)
        ));
    }
    ctx.output.kv("subtotal", &dollars(order.subtotal));
    if let Some(shipping) = order.shipping_cost {
        ctx.output.kv("shipping", &dollars(shipping));
    }
    if let Some(tax) = order.tax {
        ctx.output.kv("tax", &dollars(tax));
    }
    if let Some(discount) = order.discount {
        ctx.output.kv("discount", &format!("-{}", dollars(discount)));
    }
    ctx.output.kv("total", &dollars(order.total));
}
