//! Browse the catalog.

use anyhow::Result;
use serde::Serialize;
use tienda_commerce::catalog::{fetch_or_empty, CatalogRecord};
use tienda_commerce::search::{run_query, Pagination, QueryDescriptor, Scope, SortDirection};

use super::CatalogArgs;
use crate::context::Context;
use crate::output::{format_box, Output};

#[derive(Serialize)]
struct CatalogPage<'a> {
    title: String,
    query: &'a QueryDescriptor,
    items: Vec<&'a CatalogRecord>,
    pagination: Pagination,
}

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let scope = Scope {
        category: args.category.map(Into::into),
        subcategory: args.subcategory.map(Into::into),
    };
    warn_unknown_scope(&scope, ctx);

    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let query = build_query(&args.search, args.admin, ctx)
        .with_scope(scope.clone())
        .with_sort(args.sort.into(), direction)
        .with_page(args.page);

    let spinner = ctx.output.spinner("Loading catalog...");
    let records = fetch_or_empty(&ctx.catalog_source(), &scope).await;
    spinner.finish_and_clear();

    let results = run_query(&records, &query);
    let title = ctx.taxonomy.scope_title(&scope);

    if ctx.output.is_json() {
        ctx.output.json(&CatalogPage {
            title,
            query: &query,
            items: results.items,
            pagination: results.pagination,
        });
        return Ok(());
    }

    ctx.output.header(&title);
    if let Some(term) = args.search.as_deref().filter(|t| !t.is_empty()) {
        ctx.output.kv("search", term);
    }

    if results.pagination.total_items == 0 {
        ctx.output.info("No products found");
        return Ok(());
    }

    print_records(&ctx.output, &results.items);
    ctx.output.pagination(&results.pagination);

    Ok(())
}

fn build_query(search: &Option<String>, admin: bool, ctx: &Context) -> QueryDescriptor {
    let query = if admin {
        QueryDescriptor::admin()
            .with_page_size(ctx.config.catalog.admin_page_size)
            .with_match_fields(ctx.config.search.admin_match_fields.clone())
    } else {
        QueryDescriptor::catalog()
            .with_page_size(ctx.config.catalog.page_size)
            .with_match_fields(ctx.config.search.match_fields.clone())
    };
    query.with_term(search.clone().unwrap_or_default())
}

fn warn_unknown_scope(scope: &Scope, ctx: &Context) {
    match (&scope.category, &scope.subcategory) {
        (Some(cat), Some(sub)) if !ctx.taxonomy.contains(cat, sub) => ctx
            .output
            .warn(&format!("Unknown subcategory '{}' in '{}'", sub, cat)),
        (Some(cat), None) if ctx.taxonomy.category(cat).is_none() => {
            ctx.output.warn(&format!("Unknown category '{}'", cat))
        }
        _ => {}
    }
}

/// Print records as a product table.
pub(crate) fn print_records(output: &Output, records: &[&CatalogRecord]) {
    let widths = [14, 30, 12, 16, 12, 20];
    output.table_header(
        &["ID", "NAME", "PRICE", "BOX", "SUBCATEGORY", "VARIANTS"],
        &widths,
    );
    for record in records {
        let price = record.unit_price.display();
        let boxed = format_box(record.box_pricing.as_ref());
        let variants = record.variants.join(", ");
        output.table_row(
            &[
                record.id.as_str(),
                &record.name,
                &price,
                &boxed,
                record.subcategory.as_str(),
                &variants,
            ],
            &widths,
        );
    }
}
