//! Integration tests for FreshFold.
//!
//! Everything in `tests/` runs against the real file-backed storage in a
//! per-test temporary directory - no network, no fixtures to start.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fresh-fold-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use fresh_fold_client::store::{JsonFileStorage, OrderStore, PreferenceStore, StorageBackend};

static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A per-test storage directory, removed on drop.
pub struct TestDir {
    path: PathBuf,
}

impl TestDir {
    /// Create a unique empty directory under the system temp dir.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        let n = DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "freshfold-it-{tag}-{}-{n}",
            std::process::id()
        ));
        Self { path }
    }

    /// The directory path.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// A file-backed storage backend rooted in this directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn StorageBackend> {
        Arc::new(JsonFileStorage::open(&self.path).expect("create storage dir"))
    }

    /// An [`OrderStore`] over this directory.
    #[must_use]
    pub fn order_store(&self) -> OrderStore {
        OrderStore::new(self.storage())
    }

    /// A [`PreferenceStore`] over this directory.
    #[must_use]
    pub fn preference_store(&self) -> PreferenceStore {
        PreferenceStore::new(self.storage())
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
