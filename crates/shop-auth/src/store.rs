//! Session state shared by the shell's commands.

use crate::form::RegisterForm;
use crate::service::{AuthService, Credentials};
use crate::{AuthError, User};
use serde::{Deserialize, Serialize};
use shop_api::FetchError;
use shop_store::{Cache, Record, AUTH_STORAGE_KEY};
use tracing::{debug, error, info, warn};

/// Fallback message for a failed sign-in.
pub const LOGIN_FAILED: &str = "Login failed";

/// Fallback message for a failed registration.
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// The part of the session persisted under `auth-storage`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedAuth {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// Signed-in user plus the status of the last auth call.
///
/// `user` and `is_authenticated` survive restarts; `is_loading` and `error`
/// do not.
pub struct AuthStore {
    service: AuthService,
    record: Record<PersistedAuth>,
    user: Option<User>,
    is_authenticated: bool,
    is_loading: bool,
    error: Option<String>,
}

impl AuthStore {
    /// Restore the persisted session from `cache`.
    pub fn load(service: AuthService, cache: &Cache) -> Result<Self, AuthError> {
        let record = Record::new(cache.clone(), AUTH_STORAGE_KEY);
        let persisted: PersistedAuth = record.load_or_default()?;
        debug!(is_authenticated = persisted.is_authenticated, "auth state restored");
        Ok(Self {
            service,
            record,
            user: persisted.user,
            is_authenticated: persisted.is_authenticated,
            is_loading: false,
            error: None,
        })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message from the last failed call, if it has not been cleared.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn service(&self) -> &AuthService {
        &self.service
    }

    /// Sign in and remember the user.
    ///
    /// On failure `error` holds the server's `detail`, else
    /// [`LOGIN_FAILED`], and the same message is returned.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        self.is_loading = true;
        self.error = None;

        let result = self.service.login(&Credentials { email, password }).await;
        self.is_loading = false;

        match result {
            Ok(response) => {
                self.set_session(Some(response.user))?;
                match self.user.as_ref() {
                    Some(user) => Ok(user),
                    None => Err(AuthError::NotAuthenticated),
                }
            }
            Err(e) => {
                error!(error = %e, "login failed");
                let message = e
                    .field_message("detail")
                    .unwrap_or_else(|| LOGIN_FAILED.to_string());
                self.error = Some(message.clone());
                Err(AuthError::LoginFailed(message))
            }
        }
    }

    /// Validate the form and create an account. Does not sign in.
    pub async fn register(&mut self, form: &RegisterForm) -> Result<(), AuthError> {
        self.error = None;
        if let Err(errors) = form.validate() {
            self.error = Some(errors.to_string());
            return Err(AuthError::InvalidForm(errors));
        }

        self.is_loading = true;
        let result = self.service.register(&form.to_request()).await;
        self.is_loading = false;

        match result {
            Ok(_) => {
                info!(email = form.email.trim(), "account registered");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "registration failed");
                let message = registration_message(&e);
                self.error = Some(message.clone());
                Err(AuthError::RegistrationFailed(message))
            }
        }
    }

    /// Forget tokens and the user.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.service.logout()?;
        self.set_session(None)?;
        info!("signed out");
        Ok(())
    }

    /// Refresh the user from the server.
    ///
    /// Without a stored token the session is cleared and `None` returned.
    /// A failed lookup also clears the session; the tokens are dropped only
    /// when the server rejected them (401 or 403).
    pub async fn load_user(&mut self) -> Result<Option<&User>, AuthError> {
        if !self.service.has_token()? {
            self.set_session(None)?;
            return Ok(None);
        }

        self.is_loading = true;
        let result = self.service.current_user().await;
        self.is_loading = false;

        match result {
            Ok(user) => {
                self.set_session(Some(user))?;
                Ok(self.user.as_ref())
            }
            Err(e) => {
                warn!(error = %e, "could not load current user");
                self.set_session(None)?;
                if e.is_auth_rejection() {
                    self.service.logout()?;
                }
                Ok(None)
            }
        }
    }

    fn set_session(&mut self, user: Option<User>) -> Result<(), AuthError> {
        self.is_authenticated = user.is_some();
        self.user = user;
        self.record.save(&PersistedAuth {
            user: self.user.clone(),
            is_authenticated: self.is_authenticated,
        })?;
        Ok(())
    }
}

/// First of the server's `email`, `password` or `detail` messages.
fn registration_message(e: &FetchError) -> String {
    ["email", "password", "detail"]
        .iter()
        .find_map(|field| e.field_message(field))
        .unwrap_or_else(|| REGISTRATION_FAILED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shop_api::{ApiClient, Method, StubTransport};
    use shop_store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use std::sync::Arc;

    fn user_json() -> serde_json::Value {
        json!({"id": 1, "email": "a@b.co", "first_name": "Ada", "last_name": "L", "role": "customer"})
    }

    fn store(stub: StubTransport) -> (AuthStore, Cache, Arc<StubTransport>) {
        let stub = Arc::new(stub);
        let cache = Cache::in_memory();
        let api = ApiClient::new("", stub.clone(), cache.clone());
        let store = AuthStore::load(AuthService::new(api), &cache).unwrap();
        (store, cache, stub)
    }

    fn form() -> RegisterForm {
        RegisterForm {
            email: "a@b.co".to_string(),
            password: "pw123456".to_string(),
            password2: "pw123456".to_string(),
            first_name: "Ada".to_string(),
            last_name: "L".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success_persists() {
        let (mut auth, cache, _) = store(StubTransport::new().json(
            Method::Post,
            "/users/token/",
            200,
            json!({"access": "acc", "refresh": "ref", "user": user_json()}),
        ));

        let user = auth.login("a@b.co", "pw").await.unwrap();
        assert_eq!(user.first_name, "Ada");
        assert!(auth.is_authenticated());
        assert!(!auth.is_loading());
        assert_eq!(auth.error(), None);

        let persisted: serde_json::Value = cache.get(AUTH_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(persisted["is_authenticated"], true);
        assert_eq!(persisted["user"]["email"], "a@b.co");
        assert!(persisted.get("error").is_none());
    }

    #[tokio::test]
    async fn test_login_failure_uses_detail() {
        let (mut auth, _, _) = store(StubTransport::new().json(
            Method::Post,
            "/users/token/",
            401,
            json!({"detail": "No active account found with the given credentials"}),
        ));

        let err = auth.login("a@b.co", "bad").await.unwrap_err();
        assert!(matches!(err, AuthError::LoginFailed(_)));
        assert_eq!(auth.error(), Some("No active account found with the given credentials"));
        assert!(!auth.is_authenticated());

        auth.clear_error();
        assert_eq!(auth.error(), None);
    }

    #[tokio::test]
    async fn test_login_network_failure_generic_message() {
        let (mut auth, _, _) = store(StubTransport::new());
        assert!(auth.login("a@b.co", "pw").await.is_err());
        assert_eq!(auth.error(), Some(LOGIN_FAILED));
    }

    #[tokio::test]
    async fn test_register_does_not_sign_in() {
        let (mut auth, cache, stub) = store(StubTransport::new().json(
            Method::Post,
            "/users/users/",
            201,
            user_json(),
        ));

        auth.register(&form()).await.unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(cache.get::<String>(ACCESS_TOKEN_KEY).unwrap(), None);
        let body = stub.last_request().unwrap().body_json().unwrap();
        assert!(body["phone_number"].is_null());
    }

    #[tokio::test]
    async fn test_register_invalid_form_skips_network() {
        let (mut auth, _, stub) = store(StubTransport::new());
        let bad = RegisterForm {
            password2: "other".to_string(),
            ..form()
        };
        let err = auth.register(&bad).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidForm(_)));
        assert_eq!(auth.error(), Some("Passwords do not match"));
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_register_error_precedence() {
        let (mut auth, _, _) = store(StubTransport::new().json(
            Method::Post,
            "/users/users/",
            400,
            json!({
                "detail": "Bad request",
                "password": ["This password is too common."],
                "email": ["user with this email already exists."]
            }),
        ));
        auth.register(&form()).await.unwrap_err();
        assert_eq!(auth.error(), Some("user with this email already exists."));
    }

    #[tokio::test]
    async fn test_register_error_fallback_message() {
        let (mut auth, _, _) = store(StubTransport::new().json(
            Method::Post,
            "/users/users/",
            500,
            json!({"unexpected": true}),
        ));
        auth.register(&form()).await.unwrap_err();
        assert_eq!(auth.error(), Some(REGISTRATION_FAILED));
    }

    #[tokio::test]
    async fn test_load_user_without_token_clears_state() {
        let (mut auth, cache, stub) = store(StubTransport::new());
        cache
            .set(AUTH_STORAGE_KEY, &json!({"user": user_json(), "is_authenticated": true}))
            .unwrap();
        let mut auth_restored = AuthStore::load(auth.service().clone(), &cache).unwrap();
        assert!(auth_restored.is_authenticated());

        assert!(auth_restored.load_user().await.unwrap().is_none());
        assert!(!auth_restored.is_authenticated());
        assert!(stub.requests().is_empty());

        assert!(auth.load_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_user_success() {
        let (mut auth, cache, stub) = store(StubTransport::new().json(
            Method::Get,
            "/users/users/me/",
            200,
            user_json(),
        ));
        cache.set(ACCESS_TOKEN_KEY, "acc").unwrap();

        let user = auth.load_user().await.unwrap().cloned();
        assert_eq!(user.map(|u| u.email), Some("a@b.co".to_string()));
        assert!(auth.is_authenticated());
        assert_eq!(
            stub.last_request().unwrap().header_value("Authorization"),
            Some("Bearer acc")
        );
    }

    #[tokio::test]
    async fn test_load_user_rejected_token_is_cleared() {
        let (mut auth, cache, _) = store(StubTransport::new().json(
            Method::Get,
            "/users/users/me/",
            401,
            json!({"detail": "Token is invalid or expired"}),
        ));
        cache.set(ACCESS_TOKEN_KEY, "stale").unwrap();
        cache.set(REFRESH_TOKEN_KEY, "stale").unwrap();

        assert!(auth.load_user().await.unwrap().is_none());
        assert!(!auth.is_authenticated());
        assert_eq!(cache.get::<String>(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(cache.get::<String>(REFRESH_TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_user_server_error_keeps_tokens() {
        let (mut auth, cache, _) = store(StubTransport::new().json(
            Method::Get,
            "/users/users/me/",
            503,
            json!({}),
        ));
        cache.set(ACCESS_TOKEN_KEY, "acc").unwrap();

        assert!(auth.load_user().await.unwrap().is_none());
        assert!(!auth.is_authenticated());
        assert_eq!(cache.get::<String>(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("acc"));
    }

    #[tokio::test]
    async fn test_logout() {
        let (mut auth, cache, _) = store(StubTransport::new().json(
            Method::Post,
            "/users/token/",
            200,
            json!({"access": "acc", "refresh": "ref", "user": user_json()}),
        ));
        auth.login("a@b.co", "pw").await.unwrap();
        auth.logout().unwrap();

        assert!(!auth.is_authenticated());
        assert!(auth.user().is_none());
        assert_eq!(cache.get::<String>(ACCESS_TOKEN_KEY).unwrap(), None);
        let persisted: PersistedAuth = cache.get(AUTH_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(persisted, PersistedAuth::default());
    }
}
