//! Cart line items.

use crate::catalog::{BoxPricing, CatalogRecord};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One entry in the cart.
///
/// Identity is `(product_id, is_boxed)`: the same product bought by the unit
/// and by the box are two separate lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LineItemDocument", into = "LineItemDocument")]
pub struct LineItem {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Name shown in the cart, including any variant suffix.
    pub display_name: String,
    /// Price of a single unit.
    pub unit_price: Money,
    /// Box price and size, if the product sells by the box.
    pub box_pricing: Option<BoxPricing>,
    /// Display asset reference.
    pub image_ref: Option<String>,
    /// Quantity, always at least 1.
    pub quantity: u32,
    /// Whether this line is bought by the box.
    pub is_boxed: bool,
}

impl LineItem {
    /// Create an unboxed line with quantity 1.
    pub fn new(
        product_id: impl Into<ProductId>,
        display_name: impl Into<String>,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            display_name: display_name.into(),
            unit_price,
            box_pricing: None,
            image_ref: None,
            quantity: 1,
            is_boxed: false,
        }
    }

    /// Build the candidate a product card adds: quantity 1, the variant
    /// appended to the name as `"<name> - <variant>"`.
    ///
    /// Asking for the boxed line of a product without box pricing gives the
    /// unit line instead.
    pub fn from_record(record: &CatalogRecord, variant: Option<&str>, is_boxed: bool) -> Self {
        let display_name = match variant.map(str::trim).filter(|v| !v.is_empty()) {
            Some(variant) => format!("{} - {}", record.name, variant),
            None => record.name.clone(),
        };
        Self {
            product_id: record.id.clone(),
            display_name,
            unit_price: record.unit_price,
            box_pricing: record.box_pricing,
            image_ref: record.image_ref.clone(),
            quantity: 1,
            is_boxed: is_boxed && record.sells_by_box(),
        }
    }

    pub fn with_box_pricing(mut self, price: Money, size: u32) -> Self {
        self.box_pricing = Some(BoxPricing::new(price, size));
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Set the quantity, floored at 1.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    pub fn boxed(mut self, is_boxed: bool) -> Self {
        self.is_boxed = is_boxed;
        self
    }

    /// The identity the cart merges on.
    pub fn key(&self) -> (&ProductId, bool) {
        (&self.product_id, self.is_boxed)
    }

    pub fn matches(&self, product_id: &ProductId, is_boxed: bool) -> bool {
        &self.product_id == product_id && self.is_boxed == is_boxed
    }

    /// Box price when boxed (zero if the box price is missing), else the
    /// unit price.
    pub fn applied_price(&self) -> Money {
        if !self.is_boxed {
            return self.unit_price;
        }
        match &self.box_pricing {
            Some(boxed) => boxed.price,
            None => Money::zero(self.unit_price.currency),
        }
    }

    /// Applied price times quantity.
    pub fn line_total(&self) -> Money {
        self.applied_price() * self.quantity
    }
}

/// Stored shape of a line item.
///
/// Prices are kept as integer minor units so a saved cart reloads exactly.
/// `boxCurrency` is written only when it differs from `currency`.
///
/// Decoding is lenient: a missing quantity reads as 1, and a box price
/// without a box size (or the reverse) reads as no box pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineItemDocument {
    product_id: ProductId,
    display_name: String,
    unit_price_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    box_price_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    box_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_ref: Option<String>,
    #[serde(default = "default_quantity")]
    quantity: u32,
    #[serde(default)]
    is_boxed: bool,
    #[serde(default)]
    currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    box_currency: Option<Currency>,
}

fn default_quantity() -> u32 {
    1
}

impl From<LineItemDocument> for LineItem {
    fn from(doc: LineItemDocument) -> Self {
        let box_currency = doc.box_currency.unwrap_or(doc.currency);
        let box_pricing = BoxPricing::from_parts(
            doc.box_price_cents.map(|cents| Money::new(cents, box_currency)),
            doc.box_size,
        );
        Self {
            product_id: doc.product_id,
            display_name: doc.display_name,
            unit_price: Money::new(doc.unit_price_cents, doc.currency),
            box_pricing,
            image_ref: doc.image_ref,
            quantity: doc.quantity.max(1),
            is_boxed: doc.is_boxed,
        }
    }
}

impl From<LineItem> for LineItemDocument {
    fn from(item: LineItem) -> Self {
        let currency = item.unit_price.currency;
        Self {
            product_id: item.product_id,
            display_name: item.display_name,
            unit_price_cents: item.unit_price.amount_cents,
            box_price_cents: item.box_pricing.map(|b| b.price.amount_cents),
            box_size: item.box_pricing.map(|b| b.size),
            image_ref: item.image_ref,
            quantity: item.quantity,
            is_boxed: item.is_boxed,
            currency,
            box_currency: item
                .box_pricing
                .map(|b| b.price.currency)
                .filter(|c| *c != currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alfajor() -> CatalogRecord {
        CatalogRecord::new("alf-1", "Alfajor", "golosinas", "alfajores", Money::ars(100))
            .with_box_pricing(Money::ars(1800), 12)
            .with_variants(["Chocolate", "Blanco"])
            .with_image("img/alfajor.png")
    }

    #[test]
    fn test_from_record_with_variant() {
        let item = LineItem::from_record(&alfajor(), Some("Blanco"), false);
        assert_eq!(item.display_name, "Alfajor - Blanco");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.image_ref.as_deref(), Some("img/alfajor.png"));
        assert!(!item.is_boxed);

        let plain = LineItem::from_record(&alfajor(), Some("  "), false);
        assert_eq!(plain.display_name, "Alfajor");
    }

    #[test]
    fn test_boxed_requires_box_pricing() {
        let boxed = LineItem::from_record(&alfajor(), None, true);
        assert!(boxed.is_boxed);
        assert_eq!(boxed.applied_price(), Money::ars(1800));

        let loose = CatalogRecord::new("c-1", "Chicle", "golosinas", "chicles", Money::ars(5));
        let item = LineItem::from_record(&loose, None, true);
        assert!(!item.is_boxed);
        assert_eq!(item.applied_price(), Money::ars(5));
    }

    #[test]
    fn test_line_total() {
        let unit = LineItem::new("p", "P", Money::ars(100)).with_quantity(2);
        assert_eq!(unit.line_total(), Money::ars(200));

        let boxed = LineItem::new("p", "P", Money::ars(100))
            .with_box_pricing(Money::ars(1800), 12)
            .boxed(true)
            .with_quantity(3);
        assert_eq!(boxed.line_total(), Money::ars(5400));

        let missing_box = LineItem::new("p", "P", Money::ars(100)).boxed(true);
        assert!(missing_box.line_total().is_zero());
    }

    #[test]
    fn test_key() {
        let item = LineItem::new("p", "P", Money::ars(1)).boxed(true);
        assert_eq!(item.key(), (&ProductId::new("p"), true));
        assert!(item.matches(&"p".into(), true));
        assert!(!item.matches(&"p".into(), false));
    }

    #[test]
    fn test_document_shape() {
        let item = LineItem::new("alf-1", "Alfajor", Money::ars(100))
            .with_box_pricing(Money::ars(1800), 12)
            .boxed(true);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["productId"], "alf-1");
        assert_eq!(json["displayName"], "Alfajor");
        assert_eq!(json["unitPriceCents"], 10_000);
        assert_eq!(json["boxPriceCents"], 180_000);
        assert_eq!(json["currency"], "ARS");
        assert_eq!(json["boxSize"], 12);
        assert_eq!(json["isBoxed"], true);
        assert!(json.get("imageRef").is_none());
        assert!(json.get("boxCurrency").is_none());

        let back: LineItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_lenient_decoding() {
        let json = r#"{"productId":"x","displayName":"X","unitPriceCents":250,"boxPriceCents":3000,"quantity":0}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.unit_price.amount_cents, 250);
        assert_eq!(item.quantity, 1);
        assert!(item.box_pricing.is_none());
        assert!(!item.is_boxed);
    }

    #[test]
    fn test_document_keeps_exact_amounts_and_box_currency() {
        let item = LineItem::new("p", "P", Money::new(9_007_199_254_740_993, Currency::ARS))
            .with_box_pricing(Money::new(i64::MAX, Currency::USD), 6)
            .boxed(true);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""boxCurrency":"USD""#));

        let back: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
