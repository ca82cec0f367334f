//! The store's category tree.

use crate::ids::{CategoryId, SubcategoryId};
use crate::search::Scope;
use serde::{Deserialize, Serialize};

/// Heading shown when no scope is selected.
pub const ALL_PRODUCTS_TITLE: &str = "Todos los Productos";

/// A top-level category and its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Category slug.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Subcategories in display order.
    #[serde(default)]
    pub subcategories: Vec<SubcategoryNode>,
}

/// A subcategory under a [`CategoryNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryNode {
    /// Subcategory slug.
    pub id: SubcategoryId,
    /// Display name.
    pub name: String,
}

impl CategoryNode {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subcategories: Vec::new(),
        }
    }

    pub fn with_subcategory(mut self, id: impl Into<SubcategoryId>, name: impl Into<String>) -> Self {
        self.subcategories.push(SubcategoryNode {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    /// Find a subcategory by slug.
    pub fn subcategory(&self, id: &SubcategoryId) -> Option<&SubcategoryNode> {
        self.subcategories.iter().find(|s| &s.id == id)
    }
}

/// Two-level category tree used for navigation and admin validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    pub categories: Vec<CategoryNode>,
}

impl Taxonomy {
    pub fn new(categories: Vec<CategoryNode>) -> Self {
        Self { categories }
    }

    /// The tree the store ships with.
    pub fn default_store() -> Self {
        Self::new(vec![
            CategoryNode::new("golosinas", "Golosinas")
                .with_subcategory("alfajores", "Alfajores")
                .with_subcategory("chocolates", "Chocolates")
                .with_subcategory("caramelos", "Caramelos")
                .with_subcategory("chupetines", "Chupetines")
                .with_subcategory("chicles", "Chicles"),
            CategoryNode::new("almacen", "Almacén")
                .with_subcategory("conservas", "Conservas")
                .with_subcategory("pastas", "Pastas")
                .with_subcategory("aceites", "Aceites")
                .with_subcategory("arroz", "Arroz")
                .with_subcategory("legumbres", "Legumbres"),
            CategoryNode::new("limpieza", "Limpieza")
                .with_subcategory("detergentes", "Detergentes")
                .with_subcategory("lavandina", "Lavandina")
                .with_subcategory("desinfectantes", "Desinfectantes")
                .with_subcategory("papel", "Papel")
                .with_subcategory("jabones", "Jabones"),
        ])
    }

    /// Find a category by slug.
    pub fn category(&self, id: &CategoryId) -> Option<&CategoryNode> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn category_name(&self, id: &CategoryId) -> Option<&str> {
        self.category(id).map(|c| c.name.as_str())
    }

    pub fn subcategory_name(&self, category: &CategoryId, sub: &SubcategoryId) -> Option<&str> {
        self.category(category)
            .and_then(|c| c.subcategory(sub))
            .map(|s| s.name.as_str())
    }

    /// Whether `sub` is a known subcategory of `category`.
    pub fn contains(&self, category: &CategoryId, sub: &SubcategoryId) -> bool {
        self.subcategory_name(category, sub).is_some()
    }

    /// Page heading for a scope. Unknown slugs are shown as-is.
    pub fn scope_title(&self, scope: &Scope) -> String {
        match (&scope.category, &scope.subcategory) {
            (Some(cat), Some(sub)) => self
                .subcategory_name(cat, sub)
                .unwrap_or(sub.as_str())
                .to_string(),
            (Some(cat), None) => self.category_name(cat).unwrap_or(cat.as_str()).to_string(),
            (None, Some(sub)) => sub.to_string(),
            (None, None) => ALL_PRODUCTS_TITLE.to_string(),
        }
    }
}
