//! API endpoint configuration.

use std::time::Duration;

/// Environment variable that overrides the configured base URL.
pub const API_URL_ENV: &str = "SHOP_API_URL";

/// Version prefix every endpoint path lives under.
pub const API_PREFIX: &str = "/api/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where to reach the backend and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Normalized base URL ending in `/api/v1`, or empty for relative paths.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Build from a raw server URL, normalizing it.
    pub fn new(raw_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(raw_url),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply the `SHOP_API_URL` override, if set.
    pub fn with_env_override(self) -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) => self.with_url_override(Some(&url)),
            Err(_) => self,
        }
    }

    /// Replace the base URL when `url` is given.
    pub fn with_url_override(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url {
            self.base_url = normalize_base_url(url);
        }
        self
    }

    /// Check whether requests go to relative paths.
    pub fn is_relative(&self) -> bool {
        self.base_url.is_empty()
    }
}

/// Normalize a server URL to the versioned API root.
///
/// Anything from the first `/api` path segment onwards is dropped and
/// `/api/v1` appended, so `https://shop.test`, `https://shop.test/api` and
/// `https://shop.test/api/v1/` all become `https://shop.test/api/v1`. A blank
/// URL stays blank and requests go to relative paths.
pub fn normalize_base_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    // Skip past "scheme://" so the host is never mistaken for a path.
    let path_start = raw.find("://").map(|i| i + 3).unwrap_or(0);
    let mut root = raw;
    let mut search_from = path_start;
    while let Some(offset) = raw[search_from..].find("/api") {
        let at = search_from + offset;
        let after = &raw[at + 4..];
        if after.is_empty() || after.starts_with('/') || after.starts_with('?') {
            root = &raw[..at];
            break;
        }
        search_from = at + 4;
    }

    format!("{}{}", root.trim_end_matches('/'), API_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plain_host() {
        assert_eq!(normalize_base_url("http://localhost:8000"), "http://localhost:8000/api/v1");
        assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000/api/v1");
    }

    #[test]
    fn test_normalize_strips_api_suffixes() {
        assert_eq!(normalize_base_url("https://shop.test/api"), "https://shop.test/api/v1");
        assert_eq!(normalize_base_url("https://shop.test/api/v1"), "https://shop.test/api/v1");
        assert_eq!(normalize_base_url("https://shop.test/api/v1/"), "https://shop.test/api/v1");
        assert_eq!(
            normalize_base_url("https://shop.test/api/v2/products"),
            "https://shop.test/api/v1"
        );
    }

    #[test]
    fn test_normalize_keeps_api_like_hosts() {
        assert_eq!(normalize_base_url("https://apihost.test"), "https://apihost.test/api/v1");
        assert_eq!(
            normalize_base_url("https://shop.test/apiary"),
            "https://shop.test/apiary/api/v1"
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_base_url(""), "");
        assert_eq!(normalize_base_url("   "), "");
        assert!(ApiConfig::new("").is_relative());
    }

    #[test]
    fn test_url_override() {
        let config = ApiConfig::new("http://a.test").with_url_override(Some("http://b.test/api"));
        assert_eq!(config.base_url, "http://b.test/api/v1");
        let config = config.with_url_override(None);
        assert_eq!(config.base_url, "http://b.test/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
