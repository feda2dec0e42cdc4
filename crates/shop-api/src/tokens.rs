//! Persisted API tokens.

use shop_store::{Cache, StoreError, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

/// Access and refresh tokens kept under `token` and `refreshToken`.
#[derive(Debug, Clone)]
pub struct TokenStore {
    cache: Cache,
}

impl TokenStore {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// The current access token, if any.
    pub fn access_token(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .cache
            .get::<String>(ACCESS_TOKEN_KEY)?
            .filter(|t| !t.is_empty()))
    }

    /// The current refresh token, if any.
    pub fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .cache
            .get::<String>(REFRESH_TOKEN_KEY)?
            .filter(|t| !t.is_empty()))
    }

    /// Store a fresh token pair.
    pub fn set(&self, access: &str, refresh: &str) -> Result<(), StoreError> {
        self.cache.set(ACCESS_TOKEN_KEY, access)?;
        self.cache.set(REFRESH_TOKEN_KEY, refresh)
    }

    /// Forget both tokens.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.cache.delete(ACCESS_TOKEN_KEY)?;
        self.cache.delete(REFRESH_TOKEN_KEY)
    }

    /// Check whether an access token is stored.
    pub fn has_access_token(&self) -> Result<bool, StoreError> {
        Ok(self.access_token()?.is_some())
    }
}
