//! The cart manager.

use crate::cart::{CartStore, CartTotals, LineItem};
use crate::ids::ProductId;
use crate::money::Money;

/// Owns the cart's line items and writes them through to a [`CartStore`].
///
/// Mutations never fail: a missing line is a silent no-op, and a store
/// that cannot be written is logged while the in-memory cart stays
/// authoritative.
#[derive(Debug)]
pub struct CartManager<S: CartStore> {
    store: S,
    items: Vec<LineItem>,
}

impl<S: CartStore> CartManager<S> {
    /// Rehydrate the cart from `store`.
    ///
    /// An absent, unreadable or corrupt payload gives an empty cart.
    pub fn load(store: S) -> Self {
        let items = match store.load() {
            Ok(Some(stored)) => normalize(stored),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not restore cart, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(lines = items.len(), "cart loaded");
        Self { store, items }
    }

    /// Add a line, merging into an existing line with the same
    /// `(product_id, is_boxed)`.
    ///
    /// On merge only the quantity changes; the existing line keeps its name,
    /// prices and image.
    pub fn add_item(&mut self, candidate: LineItem) {
        let quantity = candidate.quantity.max(1);
        match self
            .items
            .iter_mut()
            .find(|i| i.matches(&candidate.product_id, candidate.is_boxed))
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity);
                tracing::debug!(
                    product_id = %existing.product_id,
                    is_boxed = existing.is_boxed,
                    quantity = existing.quantity,
                    "merged cart line"
                );
            }
            None => {
                tracing::debug!(
                    product_id = %candidate.product_id,
                    is_boxed = candidate.is_boxed,
                    quantity,
                    "added cart line"
                );
                self.items.push(LineItem {
                    quantity,
                    ..candidate
                });
            }
        }
        self.persist();
    }

    /// Set a line's quantity, clamped to at least 1.
    pub fn update_quantity(&mut self, product_id: &ProductId, new_quantity: i64, is_boxed: bool) {
        let quantity = u32::try_from(new_quantity.max(1)).unwrap_or(u32::MAX);
        self.set_quantity(product_id, is_boxed, |_| quantity);
    }

    /// Add one to a line's quantity.
    pub fn increment(&mut self, product_id: &ProductId, is_boxed: bool) {
        self.set_quantity(product_id, is_boxed, |q| q.saturating_add(1));
    }

    /// Take one from a line's quantity, stopping at 1.
    pub fn decrement(&mut self, product_id: &ProductId, is_boxed: bool) {
        self.set_quantity(product_id, is_boxed, |q| q.saturating_sub(1).max(1));
    }

    /// Remove a line if present.
    pub fn remove_item(&mut self, product_id: &ProductId, is_boxed: bool) {
        let before = self.items.len();
        self.items.retain(|i| !i.matches(product_id, is_boxed));
        if self.items.len() < before {
            tracing::debug!(%product_id, is_boxed, "removed cart line");
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        tracing::debug!("cleared cart");
        self.persist();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, product_id: &ProductId, is_boxed: bool) -> Option<&LineItem> {
        self.items.iter().find(|i| i.matches(product_id, is_boxed))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.totals().item_count
    }

    /// Sum of line totals.
    pub fn total(&self) -> Money {
        self.totals().total
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from_items(&self.items)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn set_quantity(&mut self, product_id: &ProductId, is_boxed: bool, f: impl FnOnce(u32) -> u32) {
        let Some(item) = self.items.iter_mut().find(|i| i.matches(product_id, is_boxed)) else {
            return;
        };
        let quantity = f(item.quantity).max(1);
        if quantity == item.quantity {
            return;
        }
        item.quantity = quantity;
        tracing::debug!(%product_id, is_boxed, quantity, "updated cart line quantity");
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.items) {
            tracing::warn!(error = %e, lines = self.items.len(), "failed to persist cart");
        }
    }
}

/// Floor quantities at 1 and fold duplicate identities into one line.
fn normalize(stored: Vec<LineItem>) -> Vec<LineItem> {
    let mut items: Vec<LineItem> = Vec::with_capacity(stored.len());
    for item in stored {
        let quantity = item.quantity.max(1);
        match items
            .iter_mut()
            .find(|i| i.matches(&item.product_id, item.is_boxed))
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => items.push(LineItem { quantity, ..item }),
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MemoryCartStore;
    use crate::money::Currency;
    use proptest::prelude::*;

    fn unit(id: &str, pesos: i64) -> LineItem {
        LineItem::new(id, id.to_uppercase(), Money::ars(pesos))
    }

    fn boxed(id: &str, pesos: i64, box_pesos: i64, size: u32) -> LineItem {
        unit(id, pesos)
            .with_box_pricing(Money::ars(box_pesos), size)
            .boxed(true)
    }

    fn manager() -> CartManager<MemoryCartStore> {
        CartManager::load(MemoryCartStore::new())
    }

    #[test]
    fn test_add_new_and_merge() {
        let mut cart = manager();
        cart.add_item(unit("a", 100).with_quantity(2));
        cart.add_item(LineItem::new("a", "Renamed", Money::ars(999)).with_quantity(3));

        assert_eq!(cart.items().len(), 1);
        let line = cart.get(&"a".into(), false).unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(line.display_name, "A");
        assert_eq!(line.unit_price, Money::ars(100));
    }

    #[test]
    fn test_boxed_and_unit_are_separate_lines() {
        let mut cart = manager();
        cart.add_item(unit("a", 100));
        cart.add_item(boxed("a", 100, 1800, 12));

        assert_eq!(cart.items().len(), 2);
        assert!(cart.get(&"a".into(), true).is_some());
        assert!(cart.get(&"a".into(), false).is_some());
    }

    #[test]
    fn test_zero_quantity_candidate_counts_as_one() {
        let mut cart = manager();
        let mut candidate = unit("a", 10);
        candidate.quantity = 0;
        cart.add_item(candidate);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = manager();
        cart.add_item(unit("c", 1));
        cart.add_item(unit("a", 1));
        cart.add_item(unit("b", 1));
        cart.add_item(unit("c", 1));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_update_quantity_clamps() {
        let mut cart = manager();
        cart.add_item(unit("a", 10));

        cart.update_quantity(&"a".into(), 7, false);
        assert_eq!(cart.item_count(), 7);

        cart.update_quantity(&"a".into(), 0, false);
        assert_eq!(cart.item_count(), 1);

        cart.update_quantity(&"a".into(), -5, false);
        assert_eq!(cart.item_count(), 1);

        cart.update_quantity(&"a".into(), i64::MAX, false);
        assert_eq!(cart.item_count(), u64::from(u32::MAX));
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut cart = manager();
        cart.add_item(unit("a", 10));
        let saves = cart.store().save_count();

        cart.update_quantity(&"a".into(), 3, true);
        cart.update_quantity(&"zzz".into(), 3, false);

        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.store().save_count(), saves);
    }

    #[test]
    fn test_increment_decrement() {
        let mut cart = manager();
        cart.add_item(unit("a", 10));

        cart.increment(&"a".into(), false);
        cart.increment(&"a".into(), false);
        assert_eq!(cart.item_count(), 3);

        cart.decrement(&"a".into(), false);
        cart.decrement(&"a".into(), false);
        cart.decrement(&"a".into(), false);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = manager();
        cart.add_item(unit("a", 10));
        cart.add_item(unit("b", 10));

        cart.remove_item(&"a".into(), true);
        assert_eq!(cart.items().len(), 2);

        cart.remove_item(&"a".into(), false);
        assert_eq!(cart.items().len(), 1);

        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.store().raw_payload().as_deref(), Some("[]"));
    }

    #[test]
    fn test_totals() {
        let mut cart = manager();
        cart.add_item(unit("a", 100).with_quantity(2));
        cart.add_item(boxed("b", 200, 1800, 12));

        assert_eq!(cart.total(), Money::ars(2000));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.totals().unique_items, 2);
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut cart = manager();
        cart.add_item(unit("a", 10));
        cart.increment(&"a".into(), false);

        let reloaded = CartManager::load(cart.into_store());
        assert_eq!(reloaded.item_count(), 2);
    }

    #[test]
    fn test_corrupt_payload_loads_empty() {
        let cart = CartManager::load(MemoryCartStore::with_payload("[{\"oops\""));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_failing_store_keeps_memory_state() {
        let mut cart = CartManager::load(MemoryCartStore::failing());
        cart.add_item(unit("a", 10));
        cart.add_item(unit("a", 10));

        assert_eq!(cart.item_count(), 2);
        assert!(cart.store().raw_payload().is_none());
    }

    #[test]
    fn test_load_folds_duplicates() {
        let payload = serde_json::to_string(&vec![
            unit("a", 10).with_quantity(2),
            unit("b", 10),
            unit("a", 10).with_quantity(3),
        ])
        .unwrap();
        let cart = CartManager::load(MemoryCartStore::with_payload(payload));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.get(&"a".into(), false).unwrap().quantity, 5);
    }

    fn line_item() -> impl Strategy<Value = LineItem> {
        (0..4usize, any::<bool>(), 1..20u32, 1..100_000i64, 1..500_000i64, 1..48u32).prop_map(
            |(n, is_boxed, quantity, unit_cents, box_cents, size)| {
                let id = format!("p{}", n);
                LineItem::new(id.as_str(), id.to_uppercase(), Money::new(unit_cents, Default::default()))
                    .with_box_pricing(Money::new(box_cents, Default::default()), size)
                    .boxed(is_boxed)
                    .with_quantity(quantity)
            },
        )
    }

    fn currency() -> impl Strategy<Value = Currency> {
        prop_oneof![Just(Currency::ARS), Just(Currency::USD), Just(Currency::EUR)]
    }

    /// Any line a store might hold: full-range amounts, mixed currencies,
    /// optional box pricing and image.
    fn stored_line_item() -> impl Strategy<Value = LineItem> {
        (
            (0..4usize, any::<bool>(), 1..u32::MAX),
            (any::<i64>(), currency()),
            prop::option::of((any::<i64>(), currency(), 1..48u32)),
            prop::option::of("[a-z/]{1,12}\\.png"),
        )
            .prop_map(|((n, is_boxed, quantity), (unit_cents, unit_currency), boxed, image)| {
                let id = format!("p{}", n);
                let mut item = LineItem::new(id.as_str(), id.to_uppercase(), Money::new(unit_cents, unit_currency))
                    .boxed(is_boxed)
                    .with_quantity(quantity);
                if let Some((box_cents, box_currency, size)) = boxed {
                    item = item.with_box_pricing(Money::new(box_cents, box_currency), size);
                }
                if let Some(image) = image {
                    item = item.with_image(image);
                }
                item
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn prop_identity_unique(adds in prop::collection::vec(line_item(), 0..40)) {
            let mut cart = manager();
            for item in adds {
                cart.add_item(item);
            }
            let items = cart.items();
            for (i, a) in items.iter().enumerate() {
                for b in &items[i + 1..] {
                    prop_assert_ne!(a.key(), b.key());
                }
            }
        }

        #[test]
        fn prop_merge_sums_quantities(item in line_item(), q1 in 1..1000u32, q2 in 1..1000u32) {
            let mut cart = manager();
            cart.add_item(item.clone().with_quantity(q1));
            cart.add_item(item.clone().with_quantity(q2));

            prop_assert_eq!(cart.items().len(), 1);
            prop_assert_eq!(cart.items()[0].quantity, q1 + q2);
        }

        #[test]
        fn prop_clamp_law(item in line_item(), q in i64::MIN..=0) {
            let mut cart = manager();
            cart.add_item(item.clone().with_quantity(5));
            cart.update_quantity(&item.product_id, q, item.is_boxed);

            prop_assert_eq!(cart.items()[0].quantity, 1);
        }

        #[test]
        fn prop_persistence_round_trip(adds in prop::collection::vec(stored_line_item(), 0..20)) {
            let mut cart = manager();
            for item in adds {
                cart.add_item(item);
            }
            let expected = cart.items().to_vec();

            let reloaded = CartManager::load(cart.into_store());
            prop_assert_eq!(reloaded.items(), expected.as_slice());
        }
    }
}
