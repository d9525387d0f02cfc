//! # Commands
//!
//! One module per top-level subcommand.
//!
//! ```text
//! cart     ──► Context ──► CartStore<ApiClient, Arc<dyn SnapshotStorage>>
//! catalog  ──► Context ──► ApiClient
//! serve    ──► FixtureHandle
//! config   ──► CartConfig
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod serve;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use rocketshoes_api::ApiClient;
use rocketshoes_cart::storage::open_storage;
use rocketshoes_cart::{CartConfig, CartStore, Notifier, SnapshotStorage};

/// The store type every cart command works against.
pub type Store = CartStore<ApiClient, Arc<dyn SnapshotStorage>>;

/// Loaded configuration plus the HTTP client built from it.
pub struct Context {
    pub config: CartConfig,
    pub client: ApiClient,
}

impl Context {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let config = CartConfig::load(config_path)?;
        let client = ApiClient::new(&config.api.base_url, config.api_timeout())?;

        debug!(base_url = %config.api.base_url, backend = %config.storage.backend, "CLI context ready");
        Ok(Context { config, client })
    }

    /// Opens the cart store on the configured slot.
    pub async fn open_store(
        &self,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Store, Box<dyn std::error::Error>> {
        let path = self.config.storage_path()?;
        let storage = open_storage(self.config.storage.backend, &path).await?;

        let store = CartStore::open_with_key(
            self.client.clone(),
            storage,
            notifier,
            self.config.storage.key.clone(),
        )
        .await?;
        Ok(store)
    }
}
