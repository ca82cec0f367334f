//! Cart persistence.
//!
//! The stored representation is a JSON array of line items under a single
//! well-known key.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::cart::LineItem;
use crate::error::CommerceError;

/// Key the cart is stored under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Durable storage for the cart's items.
pub trait CartStore {
    /// Read the stored items. `Ok(None)` when nothing was ever saved.
    fn load(&self) -> Result<Option<Vec<LineItem>>, CommerceError>;

    /// Replace the stored items.
    fn save(&self, items: &[LineItem]) -> Result<(), CommerceError>;
}

/// In-process store holding the serialized payload.
///
/// Can be switched into failing modes to exercise the cart's degraded paths.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    payload: Mutex<Option<String>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw stored payload, valid or not.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
            ..Self::default()
        }
    }

    /// A store whose every read and write fails.
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_loads.store(failing, Ordering::SeqCst);
        self.fail_saves.store(failing, Ordering::SeqCst);
    }

    pub fn set_fail_saves(&self, failing: bool) {
        self.fail_saves.store(failing, Ordering::SeqCst);
    }

    /// The payload as last written.
    pub fn raw_payload(&self) -> Option<String> {
        self.payload.lock().ok().and_then(|p| p.clone())
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> Result<Option<Vec<LineItem>>, CommerceError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(CommerceError::StorageError("cart store unavailable".to_string()));
        }
        let payload = self
            .payload
            .lock()
            .map_err(|_| CommerceError::StorageError("cart store lock poisoned".to_string()))?;
        match payload.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CommerceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CommerceError::StorageError("cart store unavailable".to_string()));
        }
        let raw = serde_json::to_string(items)?;
        let mut payload = self
            .payload
            .lock()
            .map_err(|_| CommerceError::StorageError("cart store lock poisoned".to_string()))?;
        *payload = Some(raw);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(feature = "storage")]
pub use cache_store::CacheCartStore;

#[cfg(feature = "storage")]
mod cache_store {
    use std::path::Path;

    use tienda_cache::Cache;

    use super::{CartStore, CART_STORAGE_KEY};
    use crate::cart::LineItem;
    use crate::error::CommerceError;

    /// Cart store backed by a [`tienda_cache::Cache`].
    pub struct CacheCartStore {
        cache: Cache,
        key: String,
    }

    impl CacheCartStore {
        pub fn new(cache: Cache) -> Self {
            Self {
                cache,
                key: CART_STORAGE_KEY.to_string(),
            }
        }

        /// Open a directory-backed store.
        pub fn open(dir: impl AsRef<Path>) -> Result<Self, CommerceError> {
            Ok(Self::new(Cache::open(dir)?))
        }

        pub fn with_key(mut self, key: impl Into<String>) -> Self {
            self.key = key.into();
            self
        }

        pub fn key(&self) -> &str {
            &self.key
        }

        pub fn cache(&self) -> &Cache {
            &self.cache
        }
    }

    impl CartStore for CacheCartStore {
        fn load(&self) -> Result<Option<Vec<LineItem>>, CommerceError> {
            Ok(self.cache.get(&self.key)?)
        }

        fn save(&self, items: &[LineItem]) -> Result<(), CommerceError> {
            self.cache.set(&self.key, items)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryCartStore::new();
        assert!(store.load().unwrap().is_none());

        let items = vec![LineItem::new("a", "A", Money::ars(10)).with_quantity(3)];
        store.save(&items).unwrap();

        assert_eq!(store.load().unwrap(), Some(items));
        assert_eq!(store.save_count(), 1);
        assert!(store.raw_payload().unwrap().contains("\"productId\":\"a\""));
    }

    #[test]
    fn test_memory_store_corrupt_payload() {
        let store = MemoryCartStore::with_payload("{not json");
        assert!(matches!(
            store.load(),
            Err(CommerceError::SerializationError(_))
        ));
    }

    #[test]
    fn test_memory_store_failing() {
        let store = MemoryCartStore::failing();
        assert!(matches!(store.load(), Err(CommerceError::StorageError(_))));
        assert!(store.save(&[]).is_err());
        assert_eq!(store.save_count(), 0);

        store.set_failing(false);
        assert!(store.save(&[]).is_ok());
        assert_eq!(store.raw_payload().as_deref(), Some("[]"));
    }

    #[cfg(feature = "storage")]
    #[test]
    fn test_cache_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheCartStore::open(dir.path()).unwrap();
        assert_eq!(store.key(), CART_STORAGE_KEY);
        assert!(store.load().unwrap().is_none());

        let items = vec![
            LineItem::new("a", "A", Money::ars(10)),
            LineItem::new("a", "A", Money::ars(10))
                .with_box_pricing(Money::ars(100), 12)
                .boxed(true),
        ];
        store.save(&items).unwrap();

        let reopened = CacheCartStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load().unwrap(), Some(items));
    }

    #[cfg(feature = "storage")]
    #[test]
    fn test_cache_store_custom_key() {
        let store = CacheCartStore::new(tienda_cache::Cache::in_memory()).with_key("cart-admin");
        store.save(&[LineItem::new("a", "A", Money::ars(1))]).unwrap();
        assert!(store.cache().get_raw("cart-admin").unwrap().is_some());
        assert!(store.cache().get_raw(CART_STORAGE_KEY).unwrap().is_none());
    }
}
