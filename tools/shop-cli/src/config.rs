//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shop_api::{ApiConfig, DEFAULT_TIMEOUT_SECS};
use shop_commerce::checkout::Address;

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiSection,

    /// Where persisted state lives.
    #[serde(default)]
    pub storage: StorageSection,

    /// Log filter.
    #[serde(default)]
    pub log: LogSection,

    /// Saved addresses offered at checkout.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// API settings, with `SHOP_API_URL` taking precedence over the file.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api.base_url.as_deref().unwrap_or_default())
            .with_timeout(Duration::from_secs(self.api.timeout_secs))
            .with_env_override()
    }

    /// Directory holding the cart, session and tokens.
    pub fn storage_dir(&self) -> PathBuf {
        match &self.storage.dir {
            Some(dir) => expand_home(dir),
            None => data_dir().join("shop"),
        }
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    /// Server URL; `/api/v1` is appended after normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Persisted state settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSection {
    /// Directory for persisted state (default: `~/.local/share/shop`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSection {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Find the nearest config file, walking up from `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let path = current.join(name);
            if path.exists() {
                return Some(path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    r#"# Shop CLI configuration

[api]
# Server URL. Any /api or /api/v1 suffix is replaced by /api/v1.
# SHOP_API_URL overrides this value.
base_url = "http://localhost:8000"
timeout_secs = 10

[storage]
# dir = "~/.local/share/shop"

[log]
# Used when RUST_LOG is unset.
level = "warn"

# Addresses offered at checkout. The default one is preselected.
[[addresses]]
id = "home"
name = "Jane Doe"
street = "123 Main St"
city = "Springfield"
state = "IL"
postal_code = "62701"
country = "US"
phone = "555-0100"
is_default = true
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.addresses.len(), 1);
        assert!(config.addresses[0].is_default);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("shop.json");
        std::fs::write(&json_path, r#"{"api": {"base_url": "https://shop.test/api"}}"#).unwrap();
        let config = CliConfig::load(&json_path).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://shop.test/api"));

        let toml_path = dir.path().join("shop.toml");
        std::fs::write(&toml_path, "[api]\nbase_url = \"https://shop.test/api\"\n").unwrap();
        assert_eq!(CliConfig::load(&toml_path).unwrap(), config);
    }

    #[test]
    fn test_broken_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(CliConfig::load(&path).is_err());
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("shop.toml"), "").unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join("shop.toml"));
    }

    #[test]
    fn test_storage_dir_override() {
        let config = CliConfig {
            storage: StorageSection {
                dir: Some("/var/lib/shop".to_string()),
            },
            ..CliConfig::default()
        };
        assert_eq!(config.storage_dir(), PathBuf::from("/var/lib/shop"));
    }
}
