//! Typed key-value store for tienda.
//!
//! Values are stored as JSON under string keys, either in memory or in a
//! directory on disk (one `<key>.json` file per key). The cart layer keeps
//! its line items here under a single well-known key.
//!
//! # Example
//!
//! ```rust
//! use tienda_cache::Cache;
//!
//! let cache = Cache::in_memory();
//! cache.set("cart", &vec![1, 2, 3]).unwrap();
//!
//! let items: Option<Vec<u32>> = cache.get("cart").unwrap();
//! assert_eq!(items, Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{is_valid_key, Cache};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError};
}
