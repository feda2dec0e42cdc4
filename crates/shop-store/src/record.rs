//! Typed records persisted under fixed keys.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use crate::{Cache, StoreError};

/// A single piece of client state persisted under a fixed namespace key.
///
/// Records are stored as plain JSON and restored verbatim: there is no
/// envelope, schema version or migration step.
///
/// # Example
///
/// ```rust,ignore
/// use shop_store::{Cache, Record};
///
/// #[derive(Serialize, Deserialize, Default)]
/// struct AuthState {
///     is_authenticated: bool,
/// }
///
/// let record = Record::<AuthState>::new(cache, "auth-storage");
/// let mut state = record.load_or_default()?;
/// state.is_authenticated = true;
/// record.save(&state)?;
/// ```
pub struct Record<T> {
    cache: Cache,
    key: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Record<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Bind a record type to its storage key.
    pub fn new(cache: Cache, key: &'static str) -> Self {
        Self {
            cache,
            key,
            _phantom: PhantomData,
        }
    }

    /// The fixed key this record lives under.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Load the record if it exists.
    pub fn load(&self) -> Result<Option<T>, StoreError> {
        self.cache.get(self.key)
    }

    /// Load the record, or the default state when nothing was persisted.
    ///
    /// A record that no longer parses is logged and replaced by the default
    /// rather than failing startup.
    pub fn load_or_default(&self) -> Result<T, StoreError> {
        match self.cache.get(self.key) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Ok(T::default()),
            Err(StoreError::SerializeError(e)) => {
                tracing::warn!(key = self.key, error = %e, "discarding unreadable persisted state");
                Ok(T::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Persist the record (unconditional write).
    pub fn save(&self, value: &T) -> Result<(), StoreError> {
        self.cache.set(self.key, value)
    }

    /// Remove the persisted record.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.cache.delete(self.key)
    }
}

impl<T> Clone for Record<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            key: self.key,
            _phantom: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Record<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Record").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        dark_mode: bool,
        page_size: u32,
    }

    #[test]
    fn test_load_missing_is_default() {
        let record = Record::<Prefs>::new(Cache::in_memory(), "prefs");
        assert_eq!(record.load().unwrap(), None);
        assert_eq!(record.load_or_default().unwrap(), Prefs::default());
    }

    #[test]
    fn test_save_and_load() {
        let record = Record::<Prefs>::new(Cache::in_memory(), "prefs");
        let prefs = Prefs {
            dark_mode: true,
            page_size: 24,
        };
        record.save(&prefs).unwrap();

        assert_eq!(record.load().unwrap(), Some(prefs));
    }

    #[test]
    fn test_stored_verbatim_without_envelope() {
        let cache = Cache::in_memory();
        let record = Record::<Prefs>::new(cache.clone(), "prefs");
        record.save(&Prefs::default()).unwrap();

        let raw: serde_json::Value = cache.get("prefs").unwrap().unwrap();
        assert_eq!(raw, serde_json::json!({"dark_mode": false, "page_size": 0}));
    }

    #[test]
    fn test_unreadable_record_falls_back_to_default() {
        let cache = Cache::in_memory();
        cache.set("prefs", &serde_json::json!(["garbage"])).unwrap();

        let record = Record::<Prefs>::new(cache, "prefs");
        assert_eq!(record.load_or_default().unwrap(), Prefs::default());
    }

    #[test]
    fn test_clear() {
        let record = Record::<Prefs>::new(Cache::in_memory(), "prefs");
        record.save(&Prefs::default()).unwrap();
        record.clear().unwrap();
        assert_eq!(record.load().unwrap(), None);
    }
}
