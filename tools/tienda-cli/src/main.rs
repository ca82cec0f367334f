//! tienda - Command line storefront.
//!
//! Commands:
//! - `tienda catalog` - Browse, filter, sort and page through products
//! - `tienda home` - Featured products per category
//! - `tienda suggest` - Quick search by name prefix
//! - `tienda stats` - Admin dashboard counts
//! - `tienda cart` - Show and edit the persisted cart
//! - `tienda product` - Admin product editing
//! - `tienda config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod source;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CartArgs, CatalogArgs, ConfigArgs, HomeArgs, ProductArgs, StatsArgs, SuggestArgs,
};

/// tienda - Browse the catalog and manage the cart from the terminal
#[derive(Parser)]
#[command(name = "tienda")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog(CatalogArgs),

    /// Show featured products per category
    Home(HomeArgs),

    /// Quick search by name prefix
    Suggest(SuggestArgs),

    /// Show catalog statistics
    Stats(StatsArgs),

    /// Show or edit the cart
    Cart(CartArgs),

    /// Manage catalog products
    Product(ProductArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_tracing(&ctx.config.logging.level, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Home(args) => commands::home::run(args, &ctx).await,
        Commands::Suggest(args) => commands::suggest::run(args, &ctx).await,
        Commands::Stats(args) => commands::stats::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over the config; `--verbose` raises the
/// default to debug.
fn init_tracing(level: &str, verbose: bool) {
    let default = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
