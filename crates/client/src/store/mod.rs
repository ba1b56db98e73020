//! Locally persisted client state.
//!
//! The stores in this module are explicit repository objects constructed
//! with an injected [`StorageBackend`] - a get/set/remove interface over
//! string keys. Production uses [`JsonFileStorage`]; tests substitute
//! [`MemoryStorage`].
//!
//! # Failure policy
//!
//! The local store is presentation-adjacent state, not a system of record:
//! a corrupted or unwritable backend must never take the screen down.
//! Storage errors are logged at `warn` and swallowed - queries return
//! empty/`None`/`false` sentinels instead of propagating. The backend
//! itself reports honest `Result`s; the policy lives in the stores.
//!
//! # Concurrency
//!
//! Single writer assumed. Two processes racing on the same data directory
//! end with last-write-wins, silently.

mod json_file;
mod memory;
mod orders;
mod preferences;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use orders::OrderStore;
pub use preferences::{PreferenceStore, Theme};

use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// The order history array.
    pub const ORDERS: &str = "orders";
    /// UI theme preference.
    pub const THEME: &str = "theme";
    /// UI accent color preference.
    pub const ACCENT_COLOR: &str = "accent-color";
    /// Last pickup address entered, pre-filled into forms.
    pub const CACHED_ADDRESS: &str = "cached-address";
}

/// Errors reported by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key contains characters the backend cannot represent.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A minimal key-value interface for persisted client state.
///
/// Implementations must be safe to share across threads; the stores hold
/// them behind an `Arc`.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be persisted.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`; removing an absent key is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
