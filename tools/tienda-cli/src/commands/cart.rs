//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde::Serialize;
use tienda_commerce::cart::{CartManager, CartStore, CartTotals, LineItem};
use tienda_commerce::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;

#[derive(Serialize)]
struct CartView<'a> {
    items: &'a [LineItem],
    totals: CartTotals,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add {
            id,
            variant,
            boxed,
            quantity,
        } => add(&mut cart, &id, variant.as_deref(), boxed, quantity, ctx)?,
        CartCommand::Update {
            id,
            quantity,
            boxed,
        } => {
            let id = existing_line(&cart, id, boxed, ctx)?;
            if quantity < 1 {
                ctx.output
                    .warn(&format!("Quantity {} is below 1, using 1", quantity));
            }
            cart.update_quantity(&id, quantity, boxed);
        }
        CartCommand::Inc { id, boxed } => {
            let id = existing_line(&cart, id, boxed, ctx)?;
            cart.increment(&id, boxed);
        }
        CartCommand::Dec { id, boxed } => {
            let id = existing_line(&cart, id, boxed, ctx)?;
            cart.decrement(&id, boxed);
        }
        CartCommand::Remove { id, boxed } => {
            let id = existing_line(&cart, id, boxed, ctx)?;
            cart.remove_item(&id, boxed);
            ctx.output.success(&format!("Removed {}", id));
        }
        CartCommand::Clear { yes } => {
            if cart.is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} lines from the cart?", cart.items().len()))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    ctx.output.warn("Cancelled");
                    return Ok(());
                }
            }
            cart.clear_cart();
            ctx.output.success("Cart cleared");
        }
    }

    show(&cart, ctx);
    Ok(())
}

fn add<S: CartStore>(
    cart: &mut CartManager<S>,
    id: &str,
    variant: Option<&str>,
    boxed: bool,
    quantity: u32,
    ctx: &Context,
) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let Some(record) = catalog.get(&ProductId::new(id)) else {
        bail!("Product not found: {}", id);
    };

    if let Some(variant) = variant {
        if !record.variants.iter().any(|v| v == variant) {
            if record.variants.is_empty() {
                bail!("{} has no variants", record.name);
            }
            bail!(
                "Unknown variant '{}' for {} (available: {})",
                variant,
                record.name,
                record.variants.join(", ")
            );
        }
    }
    if boxed && !record.sells_by_box() {
        ctx.output
            .warn(&format!("{} is not sold by the box, adding units", record.name));
    }

    let candidate = LineItem::from_record(record, variant, boxed).with_quantity(quantity);
    ctx.output.success(&format!(
        "Added {} x {}{}",
        candidate.quantity,
        candidate.display_name,
        if candidate.is_boxed { " (box)" } else { "" }
    ));
    cart.add_item(candidate);
    Ok(())
}

/// Fail with a readable message when the line is not in the cart.
fn existing_line<S: CartStore>(
    cart: &CartManager<S>,
    id: String,
    boxed: bool,
    ctx: &Context,
) -> Result<ProductId> {
    let id = ProductId::from(id);
    if cart.get(&id, boxed).is_none() {
        if cart.get(&id, !boxed).is_some() {
            ctx.output.info(&format!(
                "{} is in the cart {}; pass {} to target it",
                id,
                if boxed { "by the unit" } else { "by the box" },
                if boxed { "no --boxed" } else { "--boxed" }
            ));
        }
        bail!("Not in cart: {}{}", id, if boxed { " (box)" } else { "" });
    }
    Ok(id)
}

fn show<S: CartStore>(cart: &CartManager<S>, ctx: &Context) {
    let totals = cart.totals();

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            items: cart.items(),
            totals,
        });
        return;
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [14, 32, 10, 5, 12, 12];
    ctx.output.table_header(
        &["ID", "PRODUCT", "TYPE", "QTY", "PRICE", "TOTAL"],
        &widths,
    );
    for item in cart.items() {
        let kind = match (&item.box_pricing, item.is_boxed) {
            (Some(b), true) => format!("box x{}", b.size),
            _ => "unit".to_string(),
        };
        let quantity = item.quantity.to_string();
        let price = item.applied_price().display();
        let total = item.line_total().display();
        ctx.output.table_row(
            &[
                item.product_id.as_str(),
                &item.display_name,
                &kind,
                &quantity,
                &price,
                &total,
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Items", &totals.item_count.to_string());
    ctx.output.kv("Total", &totals.total.display());
}
