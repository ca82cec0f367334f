//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod home;
pub mod product;
pub mod stats;
pub mod suggest;

use clap::{Args, Subcommand, ValueEnum};
use tienda_commerce::search::SortKey;
use tienda_commerce::{Currency, Money};

/// Sort key accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Price,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Name,
            SortArg::Price => SortKey::Price,
        }
    }
}

/// Parse a positive decimal price in the store's currency.
pub fn parse_price(s: &str) -> Result<Money, String> {
    let amount: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    let price = Money::from_decimal(amount, Currency::ARS)
        .ok_or_else(|| format!("'{}' is not a representable price", s))?;
    if !price.is_positive() {
        return Err(format!("price must be positive, got {}", s));
    }
    Ok(price)
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Category slug (e.g. golosinas).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Subcategory slug (e.g. alfajores); requires --category.
    #[arg(short, long, requires = "category")]
    pub subcategory: Option<String>,

    /// Free-text filter.
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Sort key.
    #[arg(long, value_enum, default_value = "name")]
    pub sort: SortArg,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,

    /// Page number (1-based).
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Use the admin table's page size and match fields.
    #[arg(long)]
    pub admin: bool,
}

/// Arguments for the home command.
#[derive(Args)]
pub struct HomeArgs {
    /// Products per category (default: from config).
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the suggest command.
#[derive(Args)]
pub struct SuggestArgs {
    /// Name prefix.
    pub term: String,
}

/// Arguments for the stats command.
#[derive(Args)]
pub struct StatsArgs {
    /// Number of recent products to list.
    #[arg(short, long)]
    pub recent: Option<usize>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product.
    Add {
        /// Product id.
        id: String,
        /// Variant label.
        #[arg(long)]
        variant: Option<String>,
        /// Buy by the box.
        #[arg(short, long)]
        boxed: bool,
        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Set a line's quantity (values below 1 become 1).
    Update {
        /// Product id.
        id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        /// The boxed line.
        #[arg(short, long)]
        boxed: bool,
    },
    /// Add one to a line.
    Inc {
        /// Product id.
        id: String,
        /// The boxed line.
        #[arg(short, long)]
        boxed: bool,
    },
    /// Take one from a line, stopping at 1.
    Dec {
        /// Product id.
        id: String,
        /// The boxed line.
        #[arg(short, long)]
        boxed: bool,
    },
    /// Remove a line.
    Remove {
        /// Product id.
        id: String,
        /// The boxed line.
        #[arg(short, long)]
        boxed: bool,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Add a product to the catalog.
    Add {
        /// Product name.
        name: String,
        /// Category slug.
        #[arg(short, long)]
        category: String,
        /// Subcategory slug.
        #[arg(short, long)]
        subcategory: String,
        /// Unit price.
        #[arg(short, long, value_parser = parse_price)]
        price: Money,
        /// Box price; requires --box-size.
        #[arg(long, requires = "box_size", value_parser = parse_price)]
        box_price: Option<Money>,
        /// Units per box; requires --box-price.
        #[arg(long, requires = "box_price")]
        box_size: Option<u32>,
        /// Variant label (repeatable).
        #[arg(long = "variant")]
        variants: Vec<String>,
        /// Image reference.
        #[arg(long)]
        image: Option<String>,
        /// Explicit id (default: generated).
        #[arg(long)]
        id: Option<String>,
    },
    /// Edit an existing product.
    Edit {
        /// Product id.
        id: String,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New unit price.
        #[arg(short, long, value_parser = parse_price)]
        price: Option<Money>,
        /// New box price; requires --box-size.
        #[arg(long, requires = "box_size", conflicts_with = "no_box", value_parser = parse_price)]
        box_price: Option<Money>,
        /// New units per box; requires --box-price.
        #[arg(long, requires = "box_price", conflicts_with = "no_box")]
        box_size: Option<u32>,
        /// Stop selling by the box.
        #[arg(long)]
        no_box: bool,
        /// New category slug.
        #[arg(short, long)]
        category: Option<String>,
        /// New subcategory slug.
        #[arg(short, long)]
        subcategory: Option<String>,
        /// New image reference.
        #[arg(long, conflicts_with = "no_image")]
        image: Option<String>,
        /// Drop the image reference.
        #[arg(long)]
        no_image: bool,
    },
    /// Remove a product from the catalog.
    Remove {
        /// Product id.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Add a variant label to a product.
    VariantAdd {
        /// Product id.
        id: String,
        /// Variant label.
        label: String,
    },
    /// Remove a variant label from a product.
    VariantRemove {
        /// Product id.
        id: String,
        /// Variant label.
        label: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Create a default tienda.toml.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Check the configuration for mistakes.
    Validate,
}
