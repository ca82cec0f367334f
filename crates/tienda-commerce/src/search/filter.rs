//! Scope and text filters.

use crate::catalog::CatalogRecord;
use crate::ids::{CategoryId, SubcategoryId};
use serde::{Deserialize, Serialize};

/// Exact-match category/subcategory constraint. Unset axes pass everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Scope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<SubcategoryId>,
}

impl Scope {
    /// No constraint.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one category.
    pub fn category(category: impl Into<CategoryId>) -> Self {
        Self {
            category: Some(category.into()),
            subcategory: None,
        }
    }

    /// Restrict to one subcategory of a category.
    pub fn subcategory(category: impl Into<CategoryId>, sub: impl Into<SubcategoryId>) -> Self {
        Self {
            category: Some(category.into()),
            subcategory: Some(sub.into()),
        }
    }

    pub fn matches(&self, record: &CatalogRecord) -> bool {
        self.category.as_ref().map_or(true, |c| &record.category == c)
            && self.subcategory.as_ref().map_or(true, |s| &record.subcategory == s)
    }
}

/// A record field the free-text filter can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Name,
    Category,
    Subcategory,
}

impl MatchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchField::Name => "name",
            MatchField::Category => "category",
            MatchField::Subcategory => "subcategory",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" => Some(MatchField::Name),
            "category" => Some(MatchField::Category),
            "subcategory" => Some(MatchField::Subcategory),
            _ => None,
        }
    }

    fn value<'a>(&self, record: &'a CatalogRecord) -> &'a str {
        match self {
            MatchField::Name => &record.name,
            MatchField::Category => record.category.as_str(),
            MatchField::Subcategory => record.subcategory.as_str(),
        }
    }
}

/// The set of fields a search term is matched against.
///
/// Catalog browsing matches on the name only; the admin table also matches
/// on category and subcategory slugs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchFields(Vec<MatchField>);

impl MatchFields {
    /// Build from any list of fields; duplicates are dropped.
    pub fn new(fields: impl IntoIterator<Item = MatchField>) -> Self {
        let mut set: Vec<MatchField> = Vec::new();
        for field in fields {
            if !set.contains(&field) {
                set.push(field);
            }
        }
        Self(set)
    }

    /// Name only, as on the catalog pages.
    pub fn name_only() -> Self {
        Self(vec![MatchField::Name])
    }

    /// Name, category and subcategory, as in the admin table.
    pub fn all() -> Self {
        Self(vec![
            MatchField::Name,
            MatchField::Category,
            MatchField::Subcategory,
        ])
    }

    pub fn contains(&self, field: MatchField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MatchField> + '_ {
        self.0.iter().copied()
    }

    /// Whether any field of `record`, lower-cased, contains `term_lower`.
    ///
    /// `term_lower` must already be lower-cased; an empty term matches.
    pub fn matches(&self, record: &CatalogRecord, term_lower: &str) -> bool {
        if term_lower.is_empty() {
            return true;
        }
        self.iter()
            .any(|field| field.value(record).to_lowercase().contains(term_lower))
    }
}

impl Default for MatchFields {
    fn default() -> Self {
        Self::name_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn record() -> CatalogRecord {
        CatalogRecord::new("1", "Alfajor Triple", "golosinas", "alfajores", Money::ars(100))
    }

    #[test]
    fn test_scope_matching() {
        let r = record();
        assert!(Scope::all().matches(&r));
        assert!(Scope::category("golosinas").matches(&r));
        assert!(!Scope::category("almacen").matches(&r));
        assert!(Scope::subcategory("golosinas", "alfajores").matches(&r));
        assert!(!Scope::subcategory("golosinas", "chicles").matches(&r));
    }

    #[test]
    fn test_name_only_ignores_category() {
        let r = record();
        assert!(MatchFields::name_only().matches(&r, "triple"));
        assert!(!MatchFields::name_only().matches(&r, "golosinas"));
        assert!(MatchFields::all().matches(&r, "golosinas"));
        assert!(MatchFields::all().matches(&r, "alfaj"));
    }

    #[test]
    fn test_empty_term_matches() {
        assert!(MatchFields::new(Vec::new()).matches(&record(), ""));
        assert!(!MatchFields::new(Vec::new()).matches(&record(), "a"));
    }

    #[test]
    fn test_match_fields_dedup_and_serde() {
        let fields = MatchFields::new([MatchField::Name, MatchField::Category, MatchField::Name]);
        assert_eq!(fields.iter().count(), 2);
        assert_eq!(serde_json::to_string(&fields).unwrap(), r#"["name","category"]"#);

        let parsed: MatchFields = serde_json::from_str(r#"["subcategory"]"#).unwrap();
        assert!(parsed.contains(MatchField::Subcategory));
        assert_eq!(MatchField::from_str("Name"), Some(MatchField::Name));
    }
}
