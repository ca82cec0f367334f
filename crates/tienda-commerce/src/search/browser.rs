//! Stateful catalog browsing.

use crate::catalog::CatalogRecord;
use crate::search::{run_query, MatchFields, QueryDescriptor, QueryResults, Scope, SortDirection, SortKey};

/// The view model a catalog page drives.
///
/// Owns the latest snapshot and the current descriptor. Any change that
/// alters the filtered set sends the view back to page 1.
#[derive(Debug, Clone, Default)]
pub struct CatalogBrowser {
    snapshot: Vec<CatalogRecord>,
    descriptor: QueryDescriptor,
}

impl CatalogBrowser {
    pub fn new(descriptor: QueryDescriptor) -> Self {
        Self {
            snapshot: Vec::new(),
            descriptor,
        }
    }

    pub fn with_snapshot(mut self, records: Vec<CatalogRecord>) -> Self {
        self.replace_snapshot(records);
        self
    }

    /// Swap in a freshly fetched snapshot.
    pub fn replace_snapshot(&mut self, records: Vec<CatalogRecord>) {
        self.snapshot = records;
        self.descriptor.page = 1;
    }

    pub fn set_scope(&mut self, scope: Scope) {
        self.descriptor.scope = scope;
        self.descriptor.page = 1;
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.descriptor.term = term.into();
        self.descriptor.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey, direction: SortDirection) {
        self.descriptor.sort = sort;
        self.descriptor.direction = direction;
        self.descriptor.page = 1;
    }

    pub fn set_match_fields(&mut self, fields: MatchFields) {
        self.descriptor.match_fields = fields;
        self.descriptor.page = 1;
    }

    /// Jump to a page. Not clamped; a page past the end renders empty.
    pub fn set_page(&mut self, page: u32) {
        self.descriptor.page = page.max(1);
    }

    /// Advance one page if there is a next page.
    pub fn next_page(&mut self) -> bool {
        if self.view().pagination.has_next {
            self.descriptor.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page unless already on the first.
    pub fn prev_page(&mut self) -> bool {
        if self.descriptor.page > 1 {
            self.descriptor.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    pub fn snapshot(&self) -> &[CatalogRecord] {
        &self.snapshot
    }

    /// Run the engine over the current snapshot.
    pub fn view(&self) -> QueryResults<'_> {
        run_query(&self.snapshot, &self.descriptor)
    }
}
