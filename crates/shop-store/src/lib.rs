//! Persistent key-value storage for storefront client state.
//!
//! The storefront keeps exactly two records across sessions, the cart and
//! the auth session, plus the API tokens. Each lives under a fixed key and is
//! stored as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_store::{Cache, FileStorage, Record};
//!
//! let cache = Cache::new(FileStorage::open("~/.local/share/shop")?);
//!
//! // Raw values
//! cache.set("token", "eyJhbGciOi...")?;
//! let token: Option<String> = cache.get("token")?;
//!
//! // Typed records
//! let cart = Record::<PersistedCart>::new(cache.clone(), "cart-storage");
//! let snapshot = cart.load_or_default()?;
//! ```

mod backend;
mod error;
mod kv;
mod record;

pub use backend::{FileStorage, MemoryStorage};
pub use error::StoreError;
pub use kv::{Cache, Storage};
pub use record::Record;

/// Key of the persisted cart record.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Key of the persisted auth record.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// Key of the API access token.
pub const ACCESS_TOKEN_KEY: &str = "token";

/// Key of the API refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, FileStorage, MemoryStorage, Record, Storage, StoreError};
}
