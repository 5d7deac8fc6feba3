use trainerhub_core::store::DocumentStore;

use super::error::ApiError;
use crate::config::DatabaseConfig;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Option<DocumentStore>,
    database: DatabaseConfig,
}

impl AppState {
    pub fn new(store: Option<DocumentStore>, database: DatabaseConfig) -> Self {
        Self { store, database }
    }

    /// State for a server started without a database.
    pub fn without_store() -> Self {
        Self::new(None, DatabaseConfig::default())
    }

    /// The configured store, or [`ApiError::StoreUnavailable`] when there is none.
    pub fn store(&self) -> Result<&DocumentStore, ApiError> {
        self.store.as_ref().ok_or(ApiError::StoreUnavailable)
    }

    pub fn database(&self) -> &DatabaseConfig {
        &self.database
    }
}
