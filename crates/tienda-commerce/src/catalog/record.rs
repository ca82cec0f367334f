//! Catalog record types.

use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId, SubcategoryId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Alternate pricing for a product sold by the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxPricing {
    /// Price of one box.
    pub price: Money,
    /// Units per box.
    pub size: u32,
}

impl BoxPricing {
    pub fn new(price: Money, size: u32) -> Self {
        Self { price, size }
    }

    /// Rebuild from the optional document pair. Both halves must be present.
    pub(crate) fn from_parts(price: Option<Money>, size: Option<u32>) -> Option<Self> {
        match (price, size) {
            (Some(price), Some(size)) => Some(Self { price, size }),
            _ => None,
        }
    }
}

/// A product as stored in the document database.
///
/// The query engine never mutates records; only the admin helpers below do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordDocument", into = "RecordDocument")]
pub struct CatalogRecord {
    /// Document id.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Category slug.
    pub category: CategoryId,
    /// Subcategory slug.
    pub subcategory: SubcategoryId,
    /// Price of a single unit.
    pub unit_price: Money,
    /// Box price and size, present together or not at all.
    pub box_pricing: Option<BoxPricing>,
    /// Variant labels in display order (e.g. flavours).
    pub variants: Vec<String>,
    /// Display asset reference.
    pub image_ref: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl CatalogRecord {
    /// Create a record with no box pricing and no variants.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<CategoryId>,
        subcategory: impl Into<SubcategoryId>,
        unit_price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            subcategory: subcategory.into(),
            unit_price,
            box_pricing: None,
            variants: Vec::new(),
            image_ref: None,
            created_at: current_timestamp(),
        }
    }

    pub fn with_box_pricing(mut self, price: Money, size: u32) -> Self {
        self.box_pricing = Some(BoxPricing::new(price, size));
        self
    }

    pub fn with_variants<I, V>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for variant in variants {
            self.add_variant(variant);
        }
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Whether the product can be bought by the box.
    pub fn sells_by_box(&self) -> bool {
        self.box_pricing.is_some()
    }

    /// Add a variant label. Blank and duplicate labels are ignored.
    ///
    /// Returns `true` if the label was added.
    pub fn add_variant(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        let label = label.trim();
        if label.is_empty() || self.variants.iter().any(|v| v == label) {
            return false;
        }
        self.variants.push(label.to_string());
        true
    }

    /// Remove a variant label. Returns `true` if it was present.
    pub fn remove_variant(&mut self, label: &str) -> bool {
        let before = self.variants.len();
        self.variants.retain(|v| v != label);
        self.variants.len() < before
    }

    /// Check the fields the admin form marks as required.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.id.is_empty() {
            return Err(CommerceError::ValidationError("id is required".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(CommerceError::ValidationError("name is required".to_string()));
        }
        if self.category.is_empty() {
            return Err(CommerceError::ValidationError(
                "category is required".to_string(),
            ));
        }
        if self.subcategory.is_empty() {
            return Err(CommerceError::ValidationError(
                "subcategory is required".to_string(),
            ));
        }
        if !self.unit_price.is_positive() {
            return Err(CommerceError::ValidationError(format!(
                "unit price must be positive, got {}",
                self.unit_price
            )));
        }
        if !self.unit_price.fits_decimal() {
            return Err(CommerceError::ValidationError(format!(
                "unit price is out of range, got {}",
                self.unit_price
            )));
        }
        if let Some(boxed) = &self.box_pricing {
            if !boxed.price.is_positive() {
                return Err(CommerceError::ValidationError(format!(
                    "box price must be positive, got {}",
                    boxed.price
                )));
            }
            if !boxed.price.fits_decimal() {
                return Err(CommerceError::ValidationError(format!(
                    "box price is out of range, got {}",
                    boxed.price
                )));
            }
            if boxed.price.currency != self.unit_price.currency {
                return Err(CommerceError::ValidationError(format!(
                    "box price currency {} differs from unit price currency {}",
                    boxed.price.currency, self.unit_price.currency
                )));
            }
            if boxed.size == 0 {
                return Err(CommerceError::ValidationError(
                    "box size must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Wire shape of a record: decimal prices and a flat box price/size pair,
/// matching the documents in the product collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordDocument {
    id: ProductId,
    name: String,
    category: CategoryId,
    subcategory: SubcategoryId,
    unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    box_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    box_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    variants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_ref: Option<String>,
    #[serde(default)]
    created_at: i64,
    #[serde(default)]
    currency: Currency,
}

impl TryFrom<RecordDocument> for CatalogRecord {
    type Error = CommerceError;

    fn try_from(doc: RecordDocument) -> Result<Self, Self::Error> {
        if doc.box_price.is_some() != doc.box_size.is_some() {
            return Err(CommerceError::ValidationError(format!(
                "product {}: boxPrice and boxSize must be set together",
                doc.id
            )));
        }
        let price = |amount: f64, field: &str| {
            Money::from_decimal(amount, doc.currency).ok_or_else(|| {
                CommerceError::ValidationError(format!(
                    "product {}: {} {} is out of range",
                    doc.id, field, amount
                ))
            })
        };
        let unit_price = price(doc.unit_price, "unitPrice")?;
        let box_price = doc.box_price.map(|p| price(p, "boxPrice")).transpose()?;
        let box_pricing = BoxPricing::from_parts(box_price, doc.box_size);
        Ok(Self {
            id: doc.id,
            name: doc.name,
            category: doc.category,
            subcategory: doc.subcategory,
            unit_price,
            box_pricing,
            variants: doc.variants,
            image_ref: doc.image_ref,
            created_at: doc.created_at,
        })
    }
}

impl From<CatalogRecord> for RecordDocument {
    fn from(record: CatalogRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            category: record.category,
            subcategory: record.subcategory,
            unit_price: record.unit_price.to_decimal(),
            box_price: record.box_pricing.map(|b| b.price.to_decimal()),
            box_size: record.box_pricing.map(|b| b.size),
            variants: record.variants,
            image_ref: record.image_ref,
            created_at: record.created_at,
            currency: record.unit_price.currency,
        }
    }
}

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
