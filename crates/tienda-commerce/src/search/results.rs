//! Query results and pagination.

use crate::catalog::CatalogRecord;
use serde::{Deserialize, Serialize};

/// Pagination info.
///
/// `total_pages` is zero when nothing matched; callers hide the pagination
/// controls in that case (see [`Pagination::shows_controls`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Total number of matching items.
    pub total_items: usize,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: u32, page_size: u32, total_items: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size as usize);
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);

        Self {
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.page_size as usize)
    }

    /// Whether the page is past the last page (an empty view).
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages
    }

    /// Whether pagination controls should be rendered at all.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<u32> {
        if max_visible == 0 || self.total_pages == 0 {
            return Vec::new();
        }
        if self.total_pages as usize <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let window = max_visible as u32;
        let half = window / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = start.saturating_add(window - 1).min(self.total_pages);
        let start = end.saturating_sub(window - 1).max(1);

        (start..=end).collect()
    }

    /// Get start item number (1-indexed), zero for an empty page.
    pub fn start_item(&self) -> usize {
        if self.offset() >= self.total_items {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page as usize)
            .saturating_mul(self.page_size as usize)
            .min(self.total_items)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, crate::search::CATALOG_PAGE_SIZE, 0)
    }
}

/// The visible slice of one catalog query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResults<'a> {
    /// Records on the requested page, in sorted order.
    pub items: Vec<&'a CatalogRecord>,
    /// Pagination info over the filtered set.
    pub pagination: Pagination,
}

impl<'a> QueryResults<'a> {
    /// Check if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of records that passed the filters.
    pub fn matched(&self) -> usize {
        self.pagination.total_items
    }
}
