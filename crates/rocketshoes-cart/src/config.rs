//! # Cart Configuration
//!
//! Configuration management for the cart store and the CLI.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ROCKETSHOES_API_URL=http://localhost:3333                          │
//! │     ROCKETSHOES_STORAGE_BACKEND=file                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cart/config.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.rocketshoes.cart/config.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! backend = "sqlite"         # sqlite | file | memory
//! path = "/var/lib/rocketshoes/cart.db"
//! key = "@RocketShoes:cart"
//!
//! [display]
//! currency_symbol = "R$"
//! currency_decimals = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use rocketshoes_api::DEFAULT_BASE_URL;
use rocketshoes_core::{Money, CART_STORAGE_KEY};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Storage Backend
// =============================================================================

/// Where the cart snapshot slot lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// SQLite database file (default).
    #[default]
    Sqlite,

    /// One JSON file per slot in a directory.
    File,

    /// Process memory; nothing survives a restart.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "db" => Ok(StorageBackend::Sqlite),
            "file" | "json" => Ok(StorageBackend::File),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Catalog/stock service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the catalog and stock services.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Snapshot slot settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file (`sqlite`) or slot directory (`file`).
    /// Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Slot key of the cart snapshot.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            path: None,
            key: default_key(),
        }
    }
}

/// Money formatting for the cart summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

/// Prices carry cent precision, so digits past this are only padding.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

fn default_currency_decimals() -> u8 {
    2
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete cart configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or the platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file and returns the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoPlatformDir("config"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml()?)?;

        info!(?path, "Cart config saved");
        Ok(path)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.key must not be empty".into()));
        }

        if self.display.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "display.currency_decimals must be at most {}, got: {}",
                MAX_CURRENCY_DECIMALS, self.display.currency_decimals
            )));
        }

        Ok(())
    }

    /// Applies `ROCKETSHOES_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("ROCKETSHOES_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = var("ROCKETSHOES_API_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric API timeout"),
            }
        }

        if let Some(backend) = var("ROCKETSHOES_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %parsed, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(e) => warn!("{}", e),
            }
        }

        if let Some(path) = var("ROCKETSHOES_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(key) = var("ROCKETSHOES_CART_KEY") {
            self.storage.key = key;
        }

        if let Some(symbol) = var("ROCKETSHOES_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "rocketshoes", "cart")
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Request timeout for the HTTP client.
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Slot location for the configured backend.
    ///
    /// An explicit `storage.path` wins; otherwise `cart.db` (sqlite) or the
    /// `slots/` directory (file) under the platform data directory.
    pub fn storage_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.path {
            return Ok(path.clone());
        }

        let data_dir = Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::NoPlatformDir("data"))?;

        Ok(match self.storage.backend {
            StorageBackend::Sqlite => data_dir.join("cart.db"),
            StorageBackend::File | StorageBackend::Memory => data_dir.join("slots"),
        })
    }

    /// Formats money with the `[display]` settings.
    pub fn format_money(&self, money: Money) -> String {
        money.format(&self.display.currency_symbol, self.display.currency_decimals)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
