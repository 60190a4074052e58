//! Print the menu.

use anyhow::Result;
use shack_commerce::catalog::Catalog;

use super::MenuArgs;
use crate::context::Context;

const NAME_WIDTH: usize = 28;

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let catalog = Catalog::pizza_shack();

    if ctx.output.is_json() {
        ctx.output.json(&catalog);
        return Ok(());
    }

    let restaurant = &catalog.restaurant;
    ctx.output.header(&restaurant.name);
    ctx.output.kv("pickup", &restaurant.pickup_eta);

    for category in &catalog.categories {
        ctx.output.header(&category.title);
        if let Some(note) = &category.note {
            ctx.output.detail(note);
        }
        for item in &category.items {
            ctx.output
                .price_row(&format!("{} ({})", item.name, item.id), item.price, NAME_WIDTH);
            if let Some(description) = &item.description {
                ctx.output.detail(description);
            }
        }
    }

    if args.options {
        ctx.output.header("Sizes");
        for size in &catalog.sizes {
            let label = if size.id == catalog.default_size {
                format!("{} ({}, default)", size.name, size.id)
            } else {
                format!("{} ({})", size.name, size.id)
            };
            ctx.output.price_row(&label, size.price_delta, NAME_WIDTH);
        }

        ctx.output.header("Toppings");
        for topping in &catalog.toppings {
            ctx.output.price_row(
                &format!("{} ({})", topping.name, topping.id),
                topping.price,
                NAME_WIDTH,
            );
        }
    }

    ctx.output.info(&restaurant.note);
    Ok(())
}
