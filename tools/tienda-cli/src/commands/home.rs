//! Home page listing: a few products from each category.

use anyhow::Result;
use serde::Serialize;
use tienda_commerce::catalog::{fetch_or_empty, CatalogRecord};
use tienda_commerce::search::{featured, Scope};
use tienda_commerce::CategoryId;

use super::catalog::print_records;
use super::HomeArgs;
use crate::context::Context;

#[derive(Serialize)]
struct Section<'a> {
    category: &'a CategoryId,
    title: &'a str,
    items: Vec<&'a CatalogRecord>,
}

/// Run the home command.
pub async fn run(args: HomeArgs, ctx: &Context) -> Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.catalog.featured_limit);

    let spinner = ctx.output.spinner("Loading catalog...");
    let records = fetch_or_empty(&ctx.catalog_source(), &Scope::all()).await;
    spinner.finish_and_clear();

    let sections: Vec<Section> = ctx
        .taxonomy
        .categories
        .iter()
        .map(|category| Section {
            category: &category.id,
            title: &category.name,
            items: featured(&records, &category.id, limit),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&sections);
        return Ok(());
    }

    for section in &sections {
        ctx.output.header(section.title);
        if section.items.is_empty() {
            ctx.output.info("No products yet");
            continue;
        }
        print_records(&ctx.output, &section.items);
    }

    Ok(())
}
