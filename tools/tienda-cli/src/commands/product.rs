//! Admin product management.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use tienda_commerce::catalog::{BoxPricing, CatalogRecord, Taxonomy};
use tienda_commerce::{CategoryId, Money, ProductId, SubcategoryId};

use super::{ProductArgs, ProductCommand};
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductCommand::Add {
            name,
            category,
            subcategory,
            price,
            box_price,
            box_size,
            variants,
            image,
            id,
        } => {
            let category = CategoryId::from(category);
            let subcategory = SubcategoryId::from(subcategory);
            if !ctx.taxonomy.contains(&category, &subcategory) {
                bail!("Unknown category/subcategory: {}/{}", category, subcategory);
            }

            let id = id.map(ProductId::from).unwrap_or_else(ProductId::generate);
            let mut record = CatalogRecord::new(id, name.trim(), category, subcategory, price)
                .with_variants(variants);
            if let (Some(box_price), Some(box_size)) = (box_price, box_size) {
                record = record.with_box_pricing(box_price, box_size);
            }
            if let Some(image) = image {
                record = record.with_image(image);
            }
            add_product(record, ctx)
        }
        ProductCommand::Edit {
            id,
            name,
            price,
            box_price,
            box_size,
            no_box,
            category,
            subcategory,
            image,
            no_image,
        } => {
            let edit = ProductEdit {
                name,
                price,
                box_pricing: match (box_price, box_size) {
                    (Some(price), Some(size)) => Some(Some(BoxPricing::new(price, size))),
                    _ if no_box => Some(None),
                    _ => None,
                },
                category: category.map(CategoryId::from),
                subcategory: subcategory.map(SubcategoryId::from),
                image: match image {
                    Some(image) => Some(Some(image)),
                    None if no_image => Some(None),
                    None => None,
                },
            };
            edit_product(ProductId::from(id), edit, ctx)
        }
        ProductCommand::Remove { id, yes } => remove_product(ProductId::from(id), yes, ctx),
        ProductCommand::VariantAdd { id, label } => edit_variants(ProductId::from(id), ctx, |r| {
            if r.add_variant(label.as_str()) {
                Ok(format!("Added variant '{}' to {}", label.trim(), r.name))
            } else {
                bail!("Variant '{}' is empty or already present", label.trim())
            }
        }),
        ProductCommand::VariantRemove { id, label } => {
            edit_variants(ProductId::from(id), ctx, |r| {
                if r.remove_variant(&label) {
                    Ok(format!("Removed variant '{}' from {}", label, r.name))
                } else {
                    bail!("{} has no variant '{}'", r.name, label)
                }
            })
        }
    }
}

fn add_product(record: CatalogRecord, ctx: &Context) -> Result<()> {
    let mut catalog = ctx.load_catalog()?;
    let id = record.id.clone();
    let name = record.name.clone();
    catalog.insert(record).context("Could not add product")?;
    ctx.save_catalog(&catalog)?;

    if ctx.output.is_json() {
        ctx.output.json(&catalog.get(&id));
    } else {
        ctx.output.success(&format!("Added {} ({})", name, id));
    }
    Ok(())
}

/// Field changes for `product edit`. `None` leaves a field as it is; the
/// nested options clear the box pricing or the image.
#[derive(Debug, Default)]
struct ProductEdit {
    name: Option<String>,
    price: Option<Money>,
    box_pricing: Option<Option<BoxPricing>>,
    category: Option<CategoryId>,
    subcategory: Option<SubcategoryId>,
    image: Option<Option<String>>,
}

impl ProductEdit {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.box_pricing.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.image.is_none()
    }

    /// Apply the changes to `record`, returning the names of the fields
    /// that changed.
    fn apply(self, record: &mut CatalogRecord, taxonomy: &Taxonomy) -> Result<Vec<&'static str>> {
        let category = self.category.unwrap_or_else(|| record.category.clone());
        let subcategory = self.subcategory.unwrap_or_else(|| record.subcategory.clone());
        if !taxonomy.contains(&category, &subcategory) {
            bail!("Unknown category/subcategory: {}/{}", category, subcategory);
        }

        let mut changed = Vec::new();
        if let Some(name) = self.name {
            let name = name.trim().to_string();
            if name != record.name {
                record.name = name;
                changed.push("name");
            }
        }
        if let Some(price) = self.price.filter(|p| *p != record.unit_price) {
            record.unit_price = price;
            changed.push("price");
        }
        if let Some(box_pricing) = self.box_pricing.filter(|b| *b != record.box_pricing) {
            record.box_pricing = box_pricing;
            changed.push("box");
        }
        if category != record.category {
            record.category = category;
            changed.push("category");
        }
        if subcategory != record.subcategory {
            record.subcategory = subcategory;
            changed.push("subcategory");
        }
        if let Some(image) = self.image.filter(|i| *i != record.image_ref) {
            record.image_ref = image;
            changed.push("image");
        }
        Ok(changed)
    }
}

fn edit_product(id: ProductId, edit: ProductEdit, ctx: &Context) -> Result<()> {
    if edit.is_empty() {
        bail!("Nothing to change. Pass at least one field to edit.");
    }

    let mut catalog = ctx.load_catalog()?;
    let mut record = catalog
        .get(&id)
        .cloned()
        .with_context(|| format!("Product not found: {}", id))?;

    let changed = edit.apply(&mut record, &ctx.taxonomy)?;
    if changed.is_empty() {
        ctx.output.info(&format!("{} is already up to date", record.name));
        return Ok(());
    }

    let name = record.name.clone();
    catalog.update(record).context("Could not update product")?;
    ctx.save_catalog(&catalog)?;

    if ctx.output.is_json() {
        ctx.output.json(&catalog.get(&id));
    } else {
        ctx.output
            .success(&format!("Updated {} ({}): {}", name, id, changed.join(", ")));
    }
    Ok(())
}

fn remove_product(id: ProductId, yes: bool, ctx: &Context) -> Result<()> {
    let mut catalog = ctx.load_catalog()?;
    let Some(record) = catalog.get(&id) else {
        bail!("Product not found: {}", id);
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{}'?", record.name))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let removed = catalog.remove(&id)?;
    ctx.save_catalog(&catalog)?;
    ctx.output.success(&format!("Deleted {} ({})", removed.name, removed.id));
    Ok(())
}

fn edit_variants<F>(id: ProductId, ctx: &Context, edit: F) -> Result<()>
where
    F: FnOnce(&mut CatalogRecord) -> Result<String>,
{
    let mut catalog = ctx.load_catalog()?;
    let mut record = catalog
        .get(&id)
        .cloned()
        .with_context(|| format!("Product not found: {}", id))?;

    let message = edit(&mut record)?;
    let variants = record.variants.clone();
    catalog.update(record)?;
    ctx.save_catalog(&catalog)?;

    if ctx.output.is_json() {
        ctx.output.json(&variants);
    } else {
        ctx.output.success(&message);
        if !variants.is_empty() {
            ctx.output.kv("variants", &variants.join(", "));
        }
    }
    Ok(())
}
