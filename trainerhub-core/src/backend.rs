//! Storage backend abstraction for the document store.
//!
//! The [`StoreBackend`] trait provides a unified async interface over concrete
//! storage implementations (in-memory, MongoDB). It is object safe so the API layer
//! can hold whichever backend was configured at startup behind an `Arc<dyn StoreBackend>`.
//!
//! # Examples
//!
//! ```ignore
//! use trainerhub_core::backend::StoreBackend;
//! use bson::{oid::ObjectId, Bson, doc};
//!
//! let backend = MyBackendImpl::new();
//!
//! let id = ObjectId::new();
//! let doc = Bson::Document(doc! { "name": "Jane", "email": "j@x.com" });
//! backend.insert_documents(vec![(id, doc)], "trainer").await?;
//! ```

use async_trait::async_trait;
use bson::{Bson, oid::ObjectId};
use std::fmt::Debug;

use crate::{error::DocumentStoreResult, query::Query};

/// Abstract interface for document storage backends.
///
/// Documents cross this boundary as BSON documents. Backends store the identifier
/// under `_id` and return it as part of every document they hand back.
///
/// # Thread Safety
///
/// All implementations must be thread-safe and support concurrent access from multiple
/// async tasks.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts new documents into a collection.
    ///
    /// # Arguments
    ///
    /// * `documents` - (ObjectId, BSON document) pairs to insert
    /// * `collection` - The collection to insert into. Created automatically if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Fails with [`DocumentStoreError::DocumentAlreadyExists`](crate::error::DocumentStoreError::DocumentAlreadyExists)
    /// if an id is taken, or [`DocumentStoreError::Backend`](crate::error::DocumentStoreError::Backend)
    /// if the store is unreachable.
    async fn insert_documents(
        &self,
        documents: Vec<(ObjectId, Bson)>,
        collection: &str,
    ) -> DocumentStoreResult<()>;

    /// Retrieves documents from a collection by their IDs.
    ///
    /// Unknown IDs are omitted from the result. A missing collection yields no documents.
    async fn get_documents(
        &self,
        ids: Vec<ObjectId>,
        collection: &str,
    ) -> DocumentStoreResult<Vec<Bson>>;

    /// Queries documents in a collection.
    ///
    /// Applies the query's filter and limit, returning matches in the store's
    /// natural order. A missing collection yields no documents.
    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> DocumentStoreResult<Vec<Bson>>;

    /// Lists the names of all collections in the store.
    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>>;

    /// Releases backend resources such as pooled connections.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(&self) -> DocumentStoreResult<()> {
        Ok(())
    }
}

/// Factory trait for creating backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
