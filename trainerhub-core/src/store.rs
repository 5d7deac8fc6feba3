//! Main document store interface.
//!
//! [`DocumentStore`] wraps whichever backend was configured behind an `Arc`, so it
//! can be cloned freely into request handlers.
//!
//! # Example
//!
//! ```ignore
//! use trainerhub_core::store::DocumentStore;
//!
//! let store = DocumentStore::new(backend);
//! let trainers = store.typed_collection::<Trainer>();
//! ```

use std::sync::Arc;

use crate::{
    backend::StoreBackend,
    collection::TypedCollection,
    document::Record,
    error::DocumentStoreResult,
};

/// A shareable handle to a document store backend.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    backend: Arc<dyn StoreBackend>,
}

impl DocumentStore {
    /// Creates a new document store with the given backend.
    pub fn new(backend: impl StoreBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Gets a typed collection for the specified record type.
    ///
    /// The collection name is determined by the record type's `collection_name()` method.
    pub fn typed_collection<D: Record>(&self) -> TypedCollection<'_, D> {
        TypedCollection::new(&*self.backend)
    }

    /// Lists all collections in the store.
    pub async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        self.backend.list_collections().await
    }

    /// Releases backend resources.
    ///
    /// Other clones of this handle keep working against the backend until they
    /// issue a call the released resources were needed for.
    pub async fn shutdown(&self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await
    }
}
