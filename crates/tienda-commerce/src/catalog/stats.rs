//! Admin dashboard statistics.

use std::collections::BTreeMap;

use crate::catalog::CatalogRecord;
use crate::ids::{CategoryId, ProductId};
use serde::Serialize;

/// Number of recent products the dashboard lists.
pub const RECENT_PRODUCTS_LIMIT: usize = 5;

/// Summary of the catalog for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    /// Total number of records.
    pub total_products: usize,
    /// Record count per category slug.
    pub category_counts: BTreeMap<CategoryId, usize>,
    /// Newest records first.
    pub recent: Vec<RecentProduct>,
}

/// A row of the dashboard's "recent products" list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentProduct {
    pub id: ProductId,
    pub name: String,
    pub category: CategoryId,
    pub created_at: i64,
}

impl CatalogStats {
    /// Compute stats over a snapshot, keeping `recent_limit` newest records.
    pub fn from_records(records: &[CatalogRecord], recent_limit: usize) -> Self {
        let mut category_counts = BTreeMap::new();
        for record in records {
            *category_counts.entry(record.category.clone()).or_insert(0) += 1;
        }

        let mut newest: Vec<&CatalogRecord> = records.iter().collect();
        newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let recent = newest
            .into_iter()
            .take(recent_limit)
            .map(|r| RecentProduct {
                id: r.id.clone(),
                name: r.name.clone(),
                category: r.category.clone(),
                created_at: r.created_at,
            })
            .collect();

        Self {
            total_products: records.len(),
            category_counts,
            recent,
        }
    }

    /// Count for one category, zero if absent.
    pub fn count_for(&self, category: &CategoryId) -> usize {
        self.category_counts.get(category).copied().unwrap_or(0)
    }
}
