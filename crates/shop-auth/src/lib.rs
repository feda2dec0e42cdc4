//! Storefront sign-in.
//!
//! [`AuthStore`] keeps the signed-in user across runs and reports the
//! outcome of the last auth call; [`AuthService`] talks to the `/users/`
//! endpoints and owns token storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_auth::{AuthService, AuthStore};
//!
//! let mut auth = AuthStore::load(AuthService::new(api), &cache)?;
//! if auth.login("ada@example.com", "hunter2").await.is_err() {
//!     eprintln!("{}", auth.error().unwrap_or_default());
//! }
//! ```

mod error;
mod form;
mod service;
mod store;
mod user;

pub use error::AuthError;
pub use form::{is_valid_email, FieldError, FormErrors, RegisterForm, RegisterRequest};
pub use service::{AuthService, Credentials, LoginResponse};
pub use store::{AuthStore, PersistedAuth, LOGIN_FAILED, REGISTRATION_FAILED};
pub use user::{Role, User};
