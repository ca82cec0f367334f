//! Catalog query engine.
//!
//! Contains the query descriptor, scope and text filters, sorting,
//! pagination, the catalog browser and quick search.

mod browser;
mod engine;
mod filter;
mod query;
mod results;
mod suggest;

pub use browser::CatalogBrowser;
pub use engine::{compare_names, run_query};
pub use filter::{MatchField, MatchFields, Scope};
pub use query::{QueryDescriptor, SortDirection, SortKey, ADMIN_PAGE_SIZE, CATALOG_PAGE_SIZE};
pub use results::{Pagination, QueryResults};
pub use suggest::{featured, suggest, SuggestSettings, FEATURED_LIMIT};
