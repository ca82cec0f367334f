//! Key-Value store wrapper with automatic serialization.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

const FILE_EXTENSION: &str = "json";

/// Type-safe cache backed by memory or a directory of JSON files.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
pub struct Cache {
    backend: Backend,
}

enum Backend {
    Memory(Mutex<BTreeMap<String, Vec<u8>>>),
    Dir(PathBuf),
}

impl Cache {
    /// Create an empty in-memory cache.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(BTreeMap::new())),
        }
    }

    /// Open a directory-backed cache, creating the directory if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".tienda/cart")?;
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        tracing::debug!(dir = %dir.display(), "opened cache directory");
        Ok(Self {
            backend: Backend::Dir(dir.to_path_buf()),
        })
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist. A stored payload that does
    /// not decode as `T` is a `SerializeError`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }

    /// Get the stored bytes for a key without decoding them.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match &self.backend {
            Backend::Memory(map) => Ok(lock(map)?.get(key).cloned()),
            Backend::Dir(dir) => {
                let path = key_path(dir, key)?;
                match fs::read(&path) {
                    Ok(bytes) => Ok(Some(bytes)),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    /// Store raw bytes under a key.
    ///
    /// Directory writes go through a temporary file and a rename so a
    /// reader never sees a half-written payload.
    pub fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        match &self.backend {
            Backend::Memory(map) => {
                lock(map)?.insert(key.to_string(), bytes.to_vec());
                Ok(())
            }
            Backend::Dir(dir) => {
                let path = key_path(dir, key)?;
                let tmp = path.with_extension("json.tmp");
                fs::write(&tmp, bytes)?;
                fs::rename(&tmp, &path)?;
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.backend {
            Backend::Memory(_) => f.write_str("Cache(memory)"),
            Backend::Dir(dir) => write!(f, "Cache({})", dir.display()),
        }
    }
}

fn lock(
    map: &Mutex<BTreeMap<String, Vec<u8>>>,
) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>, CacheError> {
    map.lock()
        .map_err(|_| CacheError::StoreError("memory store poisoned".to_string()))
}

/// Whether `key` can name a value in a directory-backed cache: non-empty,
/// not starting with a dot, and made of ASCII letters, digits, `-`, `_`
/// and `.`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Map a key onto a file inside the cache directory.
fn key_path(dir: &Path, key: &str) -> Result<PathBuf, CacheError> {
    if !is_valid_key(key) {
        return Err(CacheError::InvalidKey(key.to_string()));
    }
    Ok(dir.join(format!("{}.{}", key, FILE_EXTENSION)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        quantity: u32,
    }

    fn sample() -> Vec<Item> {
        vec![
            Item {
                id: "alfajor".to_string(),
                quantity: 2,
            },
            Item {
                id: "yerba".to_string(),
                quantity: 1,
            },
        ]
    }

    #[test]
    fn test_memory_set_get() {
        let cache = Cache::in_memory();
        cache.set("cart", &sample()).unwrap();

        let loaded: Option<Vec<Item>> = cache.get("cart").unwrap();
        assert_eq!(loaded, Some(sample()));
    }

    #[test]
    fn test_memory_missing_key() {
        let cache = Cache::in_memory();
        let loaded: Option<Vec<Item>> = cache.get("cart").unwrap();
        assert!(loaded.is_none());
        assert!(cache.get_raw("cart").unwrap().is_none());
    }

    #[test]
    fn test_memory_overwrite() {
        let cache = Cache::in_memory();
        cache.set("cart", &sample()).unwrap();
        cache.set("cart", &Vec::<Item>::new()).unwrap();

        let loaded: Option<Vec<Item>> = cache.get("cart").unwrap();
        assert_eq!(loaded, Some(Vec::new()));
    }

    #[test]
    fn test_corrupt_payload_is_serialize_error() {
        let cache = Cache::in_memory();
        cache.set_raw("cart", b"{not json").unwrap();

        let result: Result<Option<Vec<Item>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_dir_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path().join("store")).unwrap();

        cache.set("cart", &sample()).unwrap();
        assert!(dir.path().join("store").join("cart.json").is_file());

        // A second handle on the same directory sees the value.
        let reopened = Cache::open(dir.path().join("store")).unwrap();
        let loaded: Option<Vec<Item>> = reopened.get("cart").unwrap();
        assert_eq!(loaded, Some(sample()));
    }

    #[test]
    fn test_dir_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path()).unwrap();

        for key in ["", "../cart", ".hidden", "a/b"] {
            let result = cache.set(key, &1);
            assert!(matches!(result, Err(CacheError::InvalidKey(_))), "key {:?}", key);
            assert!(!is_valid_key(key));
        }
        assert!(is_valid_key("cart-admin_2.v1"));
    }
}
