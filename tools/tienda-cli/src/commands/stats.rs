//! Admin dashboard statistics.

use anyhow::Result;
use tienda_commerce::catalog::{CatalogStats, RECENT_PRODUCTS_LIMIT};

use super::StatsArgs;
use crate::context::Context;
use crate::output::format_timestamp;

/// Run the stats command.
pub async fn run(args: StatsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let stats = CatalogStats::from_records(
        catalog.records(),
        args.recent.unwrap_or(RECENT_PRODUCTS_LIMIT),
    );

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Dashboard");
    ctx.output.kv("Total products", &stats.total_products.to_string());

    ctx.output.header("By category");
    for category in &ctx.taxonomy.categories {
        ctx.output
            .kv(&category.name, &stats.count_for(&category.id).to_string());
    }
    for (id, count) in &stats.category_counts {
        if ctx.taxonomy.category(id).is_none() {
            ctx.output.kv(id.as_str(), &count.to_string());
        }
    }

    ctx.output.header("Recent products");
    if stats.recent.is_empty() {
        ctx.output.info("No products yet");
    }
    for product in &stats.recent {
        let category = ctx
            .taxonomy
            .category_name(&product.category)
            .unwrap_or(product.category.as_str());
        ctx.output.list_item(&format!(
            "{}  {}  {}",
            format_timestamp(product.created_at),
            product.name,
            category
        ));
    }

    Ok(())
}
