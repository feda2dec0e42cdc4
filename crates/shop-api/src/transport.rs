//! The seam between the API client and the network.

use crate::{FetchError, Method, Request, Response};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Sends requests and returns raw responses.
///
/// Non-2xx statuses are *not* errors at this level; callers decide with
/// [`Response::error_for_status`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        Ok(Self { client })
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        if !(request.url.starts_with("http://") || request.url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(format!(
                "{} (no API base URL configured)",
                request.url
            )));
        }

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(
            method = %request.method,
            url = %request.url,
            status,
            bytes = body.len(),
            "api response"
        );
        Ok(Response::new(status, headers, body))
    }
}

enum Canned {
    Respond(Response),
    Timeout,
    Unreachable,
}

/// In-process transport serving canned responses.
///
/// Routes are matched on method and the exact URL the client builds; with
/// an empty base URL that is just the endpoint path. Every request is
/// recorded so tests can inspect headers and bodies afterwards. Unrouted
/// requests fail as if the network were down.
#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<(Method, String), Canned>>,
    requests: Mutex<Vec<Request>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method url` with `response`.
    pub fn route(self, method: Method, url: impl Into<String>, response: Response) -> Self {
        self.insert(method, url.into(), Canned::Respond(response));
        self
    }

    /// Answer `method url` with a JSON body.
    pub fn json(self, method: Method, url: impl Into<String>, status: u16, body: serde_json::Value) -> Self {
        self.route(method, url, Response::json_body(status, &body))
    }

    /// Make `method url` time out.
    pub fn timeout(self, method: Method, url: impl Into<String>) -> Self {
        self.insert(method, url.into(), Canned::Timeout);
        self
    }

    /// Make `method url` fail to connect.
    pub fn unreachable(self, method: Method, url: impl Into<String>) -> Self {
        self.insert(method, url.into(), Canned::Unreachable);
        self
    }

    fn insert(&self, method: Method, url: String, canned: Canned) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.insert((method, url), canned);
        }
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<Request> {
        self.requests().pop()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let key = (request.method, request.url.clone());
        if let Ok(mut log) = self.requests.lock() {
            log.push(request);
        }

        let routes = self
            .routes
            .lock()
            .map_err(|_| FetchError::RequestError("stub routes poisoned".to_string()))?;
        match routes.get(&key) {
            Some(Canned::Respond(response)) => Ok(response.clone()),
            Some(Canned::Timeout) => Err(FetchError::Timeout),
            Some(Canned::Unreachable) | None => Err(FetchError::RequestError(format!(
                "connection refused: {} {}",
                key.0, key.1
            ))),
        }
    }
}
