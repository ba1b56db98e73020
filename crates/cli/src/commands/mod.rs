//! Command implementations, one module per command group.

pub mod admin;
pub mod dashboard;
pub mod ml;
pub mod notifications;
pub mod orders;
pub mod profile;

use std::sync::Arc;

use thiserror::Error;

use fresh_fold_client::store::{JsonFileStorage, OrderStore, PreferenceStore, StorageBackend};
use fresh_fold_client::{ApiClient, ClientConfig};
use fresh_fold_core::Email;

pub use admin::AdminAction;
pub use ml::MlAction;
pub use notifications::NotificationAction;
pub use orders::OrderAction;
pub use profile::ProfileAction;

/// Usage errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("set FRESHFOLD_USER_EMAIL to use per-customer commands")]
    MissingUserEmail,
    #[error("order not found: {0}")]
    OrderNotFound(String),
    #[error("{0}")]
    Invalid(String),
}

/// Everything a command needs: config, API client, and local stores.
pub struct Context {
    pub config: ClientConfig,
    pub client: ApiClient,
    pub orders: OrderStore,
    pub preferences: PreferenceStore,
}

impl Context {
    /// Build the shared command context from the environment.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = ClientConfig::from_env()?;
        let client = ApiClient::new(&config)?;
        let storage: Arc<dyn StorageBackend> =
            Arc::new(JsonFileStorage::open(config.data_dir.clone())?);
        Ok(Self {
            config,
            client,
            orders: OrderStore::new(Arc::clone(&storage)),
            preferences: PreferenceStore::new(storage),
        })
    }

    /// The configured customer email, or a usage error telling the user to
    /// set it.
    pub fn user_email(&self) -> Result<&Email, CliError> {
        self.config
            .user_email
            .as_ref()
            .ok_or(CliError::MissingUserEmail)
    }
}
