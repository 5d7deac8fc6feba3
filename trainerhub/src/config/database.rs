use anyhow::Result;

use trainerhub_core::{backend::StoreBackendBuilder, store::DocumentStore};
use trainerhub_memory::InMemoryStore;

/// Connection string that selects the in-memory backend.
pub const MEMORY_URL: &str = "memory://";

/// Database configuration
///
/// Both values are optional: without a URL the server runs with no store and reports
/// the database as unavailable.
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub name: Option<String>,
}

impl DatabaseConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value: &String| !value.is_empty());

        Self {
            url: non_empty("DATABASE_URL"),
            name: non_empty("DATABASE_NAME"),
        }
    }

    /// Opens the configured store, or returns `None` when no URL is set.
    pub async fn connect(&self) -> Result<Option<DocumentStore>> {
        let Some(url) = self.url.as_deref() else {
            return Ok(None);
        };

        if url == MEMORY_URL {
            let backend = InMemoryStore::builder().build().await?;
            return Ok(Some(DocumentStore::new(backend)));
        }

        self.connect_mongodb(url).await.map(Some)
    }

    #[cfg(feature = "mongodb")]
    async fn connect_mongodb(&self, url: &str) -> Result<DocumentStore> {
        use anyhow::Context;
        use trainerhub_mongodb::MongoDbStore;

        let name = self
            .name
            .as_deref()
            .context("DATABASE_NAME must be set when DATABASE_URL points at MongoDB")?;

        let backend = MongoDbStore::builder(url, name)
            .build()
            .await
            .context("failed to create MongoDB client")?;

        Ok(DocumentStore::new(backend))
    }

    #[cfg(not(feature = "mongodb"))]
    async fn connect_mongodb(&self, _url: &str) -> Result<DocumentStore> {
        anyhow::bail!("built without MongoDB support; use DATABASE_URL={MEMORY_URL}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_url_means_no_store() {
        let config = DatabaseConfig::default();
        assert!(config.connect().await.unwrap().is_none());
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = DatabaseConfig::from_lookup(|_| Some(String::new()));

        assert_eq!(config.url, None);
        assert_eq!(config.name, None);
    }

    #[tokio::test]
    async fn memory_url_selects_in_memory_backend() {
        let config = DatabaseConfig {
            url: Some(MEMORY_URL.to_string()),
            name: None,
        };

        let store = config.connect().await.unwrap().unwrap();
        assert!(store.list_collections().await.unwrap().is_empty());
    }

    #[cfg(feature = "mongodb")]
    #[tokio::test]
    async fn mongodb_requires_database_name() {
        let config = DatabaseConfig {
            url: Some("mongodb://localhost:27017".to_string()),
            name: None,
        };

        let err = config.connect().await.unwrap_err();
        assert!(err.to_string().contains("DATABASE_NAME"));
    }
}
