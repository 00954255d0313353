//! Application state for the parser server

use std::sync::Arc;

use crate::config::ParserConfig;
use crate::error::Result;
use crate::storage::{JsonFileStore, SessionStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: ParserConfig,
    /// Session storage
    store: Arc<dyn SessionStore>,
}

impl AppState {
    /// Create state backed by the JSON file named in the config
    pub fn new(config: ParserConfig) -> Result<Self> {
        tracing::info!("Initializing parser application state...");

        let store = JsonFileStore::new(config.storage.data_file.clone())?;
        tracing::info!("Session store initialized at {}", store.path().display());

        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Create state over any session store
    pub fn with_store(config: ParserConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &ParserConfig {
        &self.inner.config
    }

    /// Get session store
    pub fn store(&self) -> &dyn SessionStore {
        self.inner.store.as_ref()
    }
}
