//! Quick search by name prefix.

use anyhow::Result;
use tienda_commerce::catalog::fetch_or_empty;
use tienda_commerce::search::{suggest, Scope};

use super::SuggestArgs;
use crate::context::Context;

/// Run the suggest command.
pub async fn run(args: SuggestArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.config.suggest_settings();
    let records = fetch_or_empty(&ctx.catalog_source(), &Scope::all()).await;
    let hits = suggest(&records, &args.term, &settings);

    if ctx.output.is_json() {
        ctx.output.json(&hits);
        return Ok(());
    }

    if args.term.trim().chars().count() < settings.min_chars {
        ctx.output.info(&format!(
            "Type at least {} characters to search",
            settings.min_chars
        ));
        return Ok(());
    }
    if hits.is_empty() {
        ctx.output.info(&format!("No products start with '{}'", args.term.trim()));
        return Ok(());
    }

    for record in hits {
        ctx.output.list_item(&format!(
            "{}  {}  {}",
            record.name,
            record.unit_price.display(),
            ctx.taxonomy.scope_title(&Scope::subcategory(
                record.category.clone(),
                record.subcategory.clone()
            ))
        ));
    }

    Ok(())
}
