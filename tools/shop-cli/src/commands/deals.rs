//! Featured deals.

use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use shop_commerce::catalog::{deal_products, ProductFilters};
use shop_commerce::deals::featured_deals;

use super::DealsArgs;
use crate::context::Context;
use crate::output::dollars;

/// `shop deals`
pub async fn run(args: DealsArgs, ctx: &Context) -> Result<()> {
    let now = Utc::now();
    let deals = featured_deals(now);

    let products = if args.no_products {
        None
    } else {
        let spinner = ctx.output.spinner("Loading deals...");
        let loaded = ctx.catalog().products(&ProductFilters::new()).await;
        spinner.finish_and_clear();
        Some(loaded.map(|all| deal_products(&all)))
    };

    if ctx.output.is_json() {
        let deals: Vec<_> = deals
            .iter()
            .map(|d| json!({ "deal": d, "time_left": d.time_left(now).to_string() }))
            .collect();
        ctx.output.json(&json!({
            "deals": deals,
            "products": products.as_ref().map(|p| &p.value),
        }));
        return Ok(());
    }

    ctx.output.header("Featured deals");
    for deal in &deals {
        ctx.output.list_item(&format!(
            "{} - {}% off - ends in {}",
            deal.title,
            deal.discount_percent,
            deal.time_left(now)
        ));
        ctx.output.kv("details", &deal.description);
    }

    if let Some(products) = products {
        ctx.output.source_notice(products.source);
        ctx.output.header("On sale now");
        if products.value.is_empty() {
            ctx.output.info("No discounted products right now");
        }
        for product in &products.value {
            ctx.output.list_item(&format!(
                "{} [{}] {} (was {}, {}% off)",
                product.name,
                product.slug,
                dollars(product.current_price()),
                dollars(product.price),
                product.discount_percentage()
            ));
        }
    }
    Ok(())
}
