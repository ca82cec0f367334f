//! Product catalog module.
//!
//! Contains the catalog record type, the store's category taxonomy, the
//! data-source seam the query engine is fed from, and dashboard statistics.

mod record;
mod source;
mod stats;
mod taxonomy;

pub use record::{BoxPricing, CatalogRecord};
pub use source::{fetch_or_empty, CatalogSource, InMemoryCatalog};
pub use stats::{CatalogStats, RecentProduct, RECENT_PRODUCTS_LIMIT};
pub use taxonomy::{CategoryNode, SubcategoryNode, Taxonomy, ALL_PRODUCTS_TITLE};
