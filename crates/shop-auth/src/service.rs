//! Token, account and password-reset endpoints.

use crate::form::RegisterRequest;
use crate::User;
use serde::{Deserialize, Serialize};
use shop_api::{ApiClient, FetchError};
use tracing::{error, info};

/// Email and password, as sent to the token endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Answer of the token endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

/// Client for the `/users/` endpoints.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for tokens and store them.
    pub async fn login(&self, credentials: &Credentials<'_>) -> Result<LoginResponse, FetchError> {
        let response: LoginResponse = self
            .api
            .post("/users/token/")
            .public()
            .json(credentials)?
            .fetch_json()
            .await?;

        self.api.tokens().set(&response.access, &response.refresh)?;
        info!(user_id = %response.user.id, "signed in");
        Ok(response)
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<serde_json::Value, FetchError> {
        self.api
            .post("/users/users/")
            .public()
            .json(request)?
            .fetch_json()
            .await
    }

    /// The user the stored token belongs to.
    pub async fn current_user(&self) -> Result<User, FetchError> {
        self.api.get("/users/users/me/").fetch_json().await
    }

    /// Ask for a password-reset email.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), FetchError> {
        self.api
            .post("/users/password-reset/")
            .public()
            .json(&serde_json::json!({ "email": email }))?
            .fetch_ok()
            .await
            .inspect_err(|e| error!(error = %e, "password reset request failed"))
    }

    /// Set a new password with the token from the reset email.
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        password: &str,
        password2: &str,
    ) -> Result<(), FetchError> {
        self.api
            .post("/users/password-reset-confirm/")
            .public()
            .json(&serde_json::json!({
                "token": token,
                "password": password,
                "password2": password2,
            }))?
            .fetch_ok()
            .await
            .inspect_err(|e| error!(error = %e, "password reset confirmation failed"))
    }

    /// Forget the stored tokens.
    pub fn logout(&self) -> Result<(), FetchError> {
        self.api.tokens().clear()?;
        Ok(())
    }

    /// Check whether an access token is stored.
    pub fn has_token(&self) -> Result<bool, FetchError> {
        Ok(self.api.tokens().has_access_token()?)
    }
}
