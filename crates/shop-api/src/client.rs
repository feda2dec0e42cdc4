//! The storefront API client.

use crate::{ApiConfig, FetchError, HttpTransport, Method, Request, Response, TokenStore, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shop_store::Cache;
use std::sync::Arc;
use tracing::debug;

/// Client for the storefront REST API.
///
/// Paths are joined onto the normalized base URL. Requests carry the
/// stored access token as a bearer header unless marked public. Cloning is
/// cheap; clones share the transport and token store.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    tokens: TokenStore,
}

impl ApiClient {
    /// Create a client over any transport.
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>, cache: Cache) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            tokens: TokenStore::new(cache),
        }
    }

    /// Create a client that talks HTTP according to `config`.
    pub fn from_config(config: &ApiConfig, cache: Cache) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::new(config.base_url.clone(), Arc::new(transport), cache))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Full URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        }
    }

    /// Create a GET request.
    pub fn get(&self, path: &str) -> ApiRequest<'_> {
        self.request(Method::Get, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: &str) -> ApiRequest<'_> {
        self.request(Method::Post, path)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, path: &str) -> ApiRequest<'_> {
        ApiRequest {
            client: self,
            request: Request::new(method, self.url(path)).accept("application/json"),
            authenticated: true,
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// A request bound to a client.
pub struct ApiRequest<'a> {
    client: &'a ApiClient,
    request: Request,
    authenticated: bool,
}

impl<'a> ApiRequest<'a> {
    /// Send without the bearer token.
    pub fn public(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.query(key, value);
        self
    }

    /// Append several query parameters.
    pub fn query_pairs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.request = self.request.query_pairs(pairs);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.request = self.request.json(value)?;
        Ok(self)
    }

    /// Send the request and return the raw response, whatever its status.
    pub async fn send(self) -> Result<Response, FetchError> {
        let mut request = self.request;
        if self.authenticated {
            if let Some(token) = self.client.tokens.access_token()? {
                request = request.bearer_auth(token);
            }
        }

        debug!(method = %request.method, url = %request.url, "api request");
        self.client.transport.send(request).await
    }

    /// Send and decode a 2xx JSON body.
    pub async fn fetch_json<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        self.send().await?.error_for_status()?.json()
    }

    /// Send and require a 2xx status, ignoring the body.
    pub async fn fetch_ok(self) -> Result<(), FetchError> {
        self.send().await?.error_for_status().map(|_| ())
    }
}
