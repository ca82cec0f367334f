//! Cart totals.

use crate::cart::LineItem;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Values derived from the cart's items. Never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of quantities.
    pub item_count: u64,
    /// Number of distinct lines.
    pub unique_items: usize,
    /// Sum of line totals.
    pub total: Money,
}

impl CartTotals {
    /// Compute totals from a list of items.
    ///
    /// The total is in the first item's currency (ARS for an empty cart)
    /// and saturates instead of overflowing.
    pub fn from_items(items: &[LineItem]) -> Self {
        let currency = items
            .first()
            .map(|i| i.unit_price.currency)
            .unwrap_or(Currency::ARS);

        let item_count = items.iter().map(|i| u64::from(i.quantity)).sum();
        let total_cents = items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.line_total().amount_cents));

        Self {
            item_count,
            unique_items: items.len(),
            total: Money::new(total_cents, currency),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.unique_items == 0
    }
}

impl Default for CartTotals {
    fn default() -> Self {
        Self::from_items(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_unit_and_box_total() {
        let items = vec![
            LineItem::new("a", "A", Money::ars(100)).with_quantity(2),
            LineItem::new("b", "B", Money::ars(200))
                .with_box_pricing(Money::ars(1800), 12)
                .boxed(true),
        ];
        let totals = CartTotals::from_items(&items);
        assert_eq!(totals.total, Money::ars(2000));
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.unique_items, 2);
    }

    #[test]
    fn test_empty_totals() {
        let totals = CartTotals::default();
        assert!(totals.is_empty());
        assert_eq!(totals.item_count, 0);
        assert_eq!(totals.total, Money::zero(Currency::ARS));
    }

    #[test]
    fn test_total_saturates() {
        let items = vec![
            LineItem::new("a", "A", Money::new(i64::MAX, Currency::ARS)).with_quantity(2),
            LineItem::new("b", "B", Money::ars(1)),
        ];
        assert_eq!(CartTotals::from_items(&items).total.amount_cents, i64::MAX);
    }
}
