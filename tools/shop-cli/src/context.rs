//! CLI execution context.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use shop_api::{ApiClient, CatalogClient, OrderService};
use shop_auth::{AuthService, AuthStore};
use shop_commerce::cart::CartStore;
use shop_store::{Cache, FileStorage};

use crate::config::{find_config_file, CliConfig};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Persisted state.
    pub cache: Cache,
    /// Backend client.
    pub api: ApiClient,
}

/// The configuration chosen for this run.
///
/// Found before logging is set up, since the log level comes from it.
pub struct LoadedConfig {
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub path: Option<PathBuf>,
    /// Working directory the search started from.
    pub cwd: PathBuf,
}

impl LoadedConfig {
    /// Read `config_path`, or the nearest config file above the working
    /// directory. No file at all yields the defaults; a file that does not
    /// parse is an error.
    pub fn find(config_path: Option<&str>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => find_config_file(&cwd),
        };
        let config = match &path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        Ok(Self { config, path, cwd })
    }
}

impl Context {
    /// Open storage and the API client for a loaded configuration.
    ///
    /// A storage directory that cannot be opened is an error.
    pub fn open(loaded: LoadedConfig, output: Output) -> Result<Self> {
        let LoadedConfig { config, path, cwd } = loaded;

        match &path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using config file");
                output.debug(&format!("Using config: {}", path.display()));
            }
            None => tracing::debug!("no config file found, using defaults"),
        }

        let storage_dir = config.storage_dir();
        let storage = FileStorage::open(storage_dir.clone())
            .with_context(|| format!("Failed to open storage: {}", storage_dir.display()))?;
        let cache = Cache::new(storage);
        tracing::debug!(dir = %storage_dir.display(), "storage opened");

        let api = ApiClient::from_config(&config.api_config(), cache.clone())
            .context("Failed to create API client")?;
        tracing::debug!(base_url = api.base_url(), "api client ready");

        Ok(Self {
            config,
            config_path: path,
            output,
            cwd,
            cache,
            api,
        })
    }

    pub fn catalog(&self) -> CatalogClient {
        CatalogClient::new(self.api.clone())
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.api.clone())
    }

    /// The persisted session.
    pub fn auth(&self) -> Result<AuthStore> {
        AuthStore::load(AuthService::new(self.api.clone()), &self.cache)
            .context("Failed to load session")
    }

    /// The persisted cart.
    pub fn load_cart(&self) -> Result<CartStore> {
        CartStore::load(&self.cache).context("Failed to load cart")
    }

    pub fn save_cart(&self, cart: &CartStore) -> Result<()> {
        cart.save(&self.cache).context("Failed to save cart")
    }
}
