//! Storefront domain types and logic for tienda.
//!
//! This crate provides the two engines behind the storefront:
//!
//! - **Cart**: line items keyed by `(product_id, is_boxed)`, merged on add,
//!   written through to a [`cart::CartStore`] on every mutation
//! - **Search**: scope and text filters, stable sorting, and fixed-size
//!   pagination over a catalog snapshot
//! - **Catalog**: catalog records, the category taxonomy, the data-source
//!   seam and dashboard statistics
//!
//! # Example
//!
//! ```rust
//! use tienda_commerce::prelude::*;
//!
//! let alfajor = CatalogRecord::new("alf-1", "Alfajor", "golosinas", "alfajores", Money::ars(100))
//!     .with_box_pricing(Money::ars(1800), 12);
//!
//! let mut cart = CartManager::load(MemoryCartStore::new());
//! cart.add_item(LineItem::from_record(&alfajor, None, false).with_quantity(2));
//! cart.add_item(LineItem::from_record(&alfajor, None, true));
//! assert_eq!(cart.total(), Money::ars(2000));
//!
//! let records = vec![alfajor];
//! let results = run_query(&records, &QueryDescriptor::catalog().with_term("alf"));
//! assert_eq!(results.len(), 1);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        fetch_or_empty, BoxPricing, CatalogRecord, CatalogSource, CatalogStats, InMemoryCatalog,
        Taxonomy,
    };

    // Cart
    pub use crate::cart::{CartManager, CartStore, CartTotals, LineItem, MemoryCartStore};

    #[cfg(feature = "storage")]
    pub use crate::cart::CacheCartStore;

    // Search
    pub use crate::search::{
        featured, run_query, suggest, CatalogBrowser, MatchField, MatchFields, Pagination,
        QueryDescriptor, QueryResults, Scope, SortDirection, SortKey, SuggestSettings,
    };
}
