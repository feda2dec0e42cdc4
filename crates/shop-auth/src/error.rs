//! Authentication errors.

use crate::form::FormErrors;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The server refused the credentials.
    #[error("{0}")]
    LoginFailed(String),

    /// The server refused the registration.
    #[error("{0}")]
    RegistrationFailed(String),

    /// The form did not pass client-side checks.
    #[error("{0}")]
    InvalidForm(FormErrors),

    /// No user is signed in.
    #[error("not signed in")]
    NotAuthenticated,

    /// API call failed.
    #[error("api error: {0}")]
    Api(#[from] shop_api::FetchError),

    /// Persisted state could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] shop_store::StoreError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            AuthError::LoginFailed(_) | AuthError::NotAuthenticated => true,
            AuthError::Api(e) => e.is_auth_rejection(),
            _ => false,
        }
    }
}
