//! Key-value store wrapper with automatic serialization.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::StoreError;

/// A raw key-value backend.
///
/// Backends store opaque bytes; [`Cache`] layers JSON serialization on top.
pub trait Storage: Send + Sync {
    /// Read the bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check whether `key` is present.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// List every stored key.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Type-safe cache over a [`Storage`] backend.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap; clones share the
/// backend.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn Storage>,
}

impl Cache {
    /// Wrap a storage backend.
    pub fn new(backend: impl Storage + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Wrap an already shared backend.
    pub fn from_shared(backend: Arc<dyn Storage>) -> Self {
        Self { backend }
    }

    /// Open an in-memory cache, mostly useful in tests.
    pub fn in_memory() -> Self {
        Self::new(crate::MemoryStorage::new())
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let token: Option<String> = cache.get("token")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.backend.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.backend.keys()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Badge {
        count: u32,
    }

    #[test]
    fn test_get_missing_key() {
        let cache = Cache::in_memory();
        let value: Option<Badge> = cache.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::in_memory();
        cache.set("badge", &Badge { count: 3 }).unwrap();

        let value: Option<Badge> = cache.get("badge").unwrap();
        assert_eq!(value, Some(Badge { count: 3 }));
        assert!(cache.exists("badge").unwrap());
    }

    #[test]
    fn test_delete() {
        let cache = Cache::in_memory();
        cache.set("token", "abc").unwrap();
        cache.delete("token").unwrap();

        assert!(!cache.exists("token").unwrap());
        // Deleting twice is fine
        cache.delete("token").unwrap();
    }

    #[test]
    fn test_clones_share_backend() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set("token", "abc").unwrap();

        let token: Option<String> = other.get("token").unwrap();
        assert_eq!(token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_wrong_shape_is_serialization_error() {
        let cache = Cache::in_memory();
        cache.set("badge", "not a badge").unwrap();

        let result = cache.get::<Badge>("badge");
        assert!(matches!(result, Err(StoreError::SerializeError(_))));
    }
}
