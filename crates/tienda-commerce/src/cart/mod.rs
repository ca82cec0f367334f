//! Shopping cart module.
//!
//! Contains line items, derived totals, the persistence seam, and the cart
//! manager that merges and mutates lines under the `(product_id, is_boxed)`
//! identity rule.

mod line_item;
mod manager;
mod pricing;
mod store;

pub use line_item::LineItem;
pub use manager::CartManager;
pub use pricing::CartTotals;
pub use store::{CartStore, MemoryCartStore, CART_STORAGE_KEY};

#[cfg(feature = "storage")]
pub use store::CacheCartStore;
