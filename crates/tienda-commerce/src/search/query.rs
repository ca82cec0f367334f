//! Query descriptor builder.

use crate::ids::{CategoryId, SubcategoryId};
use crate::search::{MatchFields, Scope};
use serde::{Deserialize, Serialize};

/// Page size on the catalog pages.
pub const CATALOG_PAGE_SIZE: u32 = 12;

/// Page size in the admin product table.
pub const ADMIN_PAGE_SIZE: u32 = 10;

/// Sort key for catalog results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Locale-aware name order.
    #[default]
    Name,
    /// Unit price order.
    Price,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "price" => Some(SortKey::Price),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Everything that drives one catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Category/subcategory constraint.
    #[serde(default)]
    pub scope: Scope,
    /// Free-text filter; empty means no text filter.
    #[serde(default)]
    pub term: String,
    /// Fields the term is matched against.
    #[serde(default)]
    pub match_fields: MatchFields,
    /// Sort key.
    #[serde(default)]
    pub sort: SortKey,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl QueryDescriptor {
    /// Defaults of the catalog pages: name match, 12 per page.
    pub fn catalog() -> Self {
        Self {
            scope: Scope::all(),
            term: String::new(),
            match_fields: MatchFields::name_only(),
            sort: SortKey::Name,
            direction: SortDirection::Ascending,
            page: 1,
            page_size: CATALOG_PAGE_SIZE,
        }
    }

    /// Defaults of the admin table: name/category/subcategory match, 10 per page.
    pub fn admin() -> Self {
        Self {
            match_fields: MatchFields::all(),
            page_size: ADMIN_PAGE_SIZE,
            ..Self::catalog()
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.scope.category = Some(category.into());
        self
    }

    /// Set the subcategory. Only meaningful together with a category.
    pub fn with_subcategory(mut self, sub: impl Into<SubcategoryId>) -> Self {
        self.scope.subcategory = Some(sub.into());
        self
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn with_match_fields(mut self, fields: MatchFields) -> Self {
        self.match_fields = fields;
        self
    }

    pub fn with_sort(mut self, sort: SortKey, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Index of the first record on the current page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1).saturating_mul(self.page_size.max(1) as usize)
    }
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self::catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MatchField;

    #[test]
    fn test_query_builder() {
        let query = QueryDescriptor::catalog()
            .with_category("golosinas")
            .with_subcategory("alfajores")
            .with_term("triple")
            .with_sort(SortKey::Price, SortDirection::Descending)
            .with_page(2);

        assert_eq!(query.scope, Scope::subcategory("golosinas", "alfajores"));
        assert_eq!(query.page, 2);
        assert_eq!(query.page_size, CATALOG_PAGE_SIZE);
        assert_eq!(query.offset(), 12);
        assert_eq!(query.sort, SortKey::Price);
    }

    #[test]
    fn test_admin_defaults() {
        let query = QueryDescriptor::admin();
        assert_eq!(query.page_size, ADMIN_PAGE_SIZE);
        assert!(query.match_fields.contains(MatchField::Category));
        assert!(query.match_fields.contains(MatchField::Subcategory));
    }

    #[test]
    fn test_page_and_size_floor_at_one() {
        let query = QueryDescriptor::catalog().with_page(0).with_page_size(0);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 1);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::from_str("PRICE"), Some(SortKey::Price));
        assert_eq!(SortKey::from_str("rating"), None);
        assert_eq!(SortDirection::Ascending.reversed(), SortDirection::Descending);
    }
}
