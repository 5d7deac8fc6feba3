//! In-memory storage implementation for document stores.
//!
//! Documents are kept per collection in insertion order, which is the natural order
//! list queries return them in.

use std::{collections::HashMap, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use bson::{Bson, oid::ObjectId};

use trainerhub_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::{ID_FIELD, into_document},
    error::{DocumentStoreError, DocumentStoreResult},
    query::Query,
};

use crate::evaluator::DocumentEvaluator;

type CollectionDocs = Vec<(ObjectId, Bson)>;
type StoreMap = HashMap<String, CollectionDocs>;


/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Clones share the same data.
///
/// Queries scan every document in the collection; there is no indexing.
///
/// # Example
///
/// ```ignore
/// use trainerhub_memory::InMemoryStore;
/// use trainerhub_core::backend::StoreBackend;
/// use bson::{oid::ObjectId, Bson, doc};
///
/// let store = InMemoryStore::new();
/// let id = ObjectId::new();
/// store.insert_documents(vec![(id, Bson::Document(doc! { "name": "Jane" }))], "trainer").await?;
///
/// let docs = store.get_documents(vec![id], "trainer").await?;
/// assert_eq!(docs.len(), 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_documents(&self, documents: Vec<(ObjectId, Bson)>, collection: &str) -> DocumentStoreResult<()> {
        let mut store = self.store.write().await;
        let existing_docs = store.get(collection).map(Vec::as_slice).unwrap_or_default();

        // Check the whole batch before writing any of it.
        let mut prepared: Vec<(ObjectId, Bson)> = Vec::with_capacity(documents.len());
        for (id, doc) in documents {
            let taken = existing_docs.iter().any(|(existing, _)| *existing == id)
                || prepared.iter().any(|(pending, _)| *pending == id);
            if taken {
                return Err(DocumentStoreError::DocumentAlreadyExists(id.to_hex(), collection.to_string()));
            }

            let mut doc = into_document(doc)?;
            doc.insert(ID_FIELD, id);

            prepared.push((id, Bson::Document(doc)));
        }

        store
            .entry(collection.to_string())
            .or_default()
            .extend(prepared);

        Ok(())
    }

    async fn get_documents(&self, ids: Vec<ObjectId>, collection: &str) -> DocumentStoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let collection_docs = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        Ok(
            collection_docs
                .iter()
                .filter(|(id, _)| ids.contains(id))
                .map(|(_, doc)| doc.clone())
                .collect()
        )
    }

    async fn query_documents(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let collection_docs = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        let documents = collection_docs.iter().map(|(_, doc)| doc);

        // Apply filter expressions if present
        let filtered_docs = match &query.filter {
            Some(filter) => DocumentEvaluator::filter_documents(documents, filter)?,
            None => documents.cloned().collect::<Vec<_>>(),
        };

        Ok(
            filtered_docs
                .into_iter()
                .take(query.limit.unwrap_or(usize::MAX))
                .collect()
        )
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        let mut names = self.store
            .read()
            .await
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }
}


/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use trainerhub_core::query::Filter;

    fn client(name: &str, trainer_id: &str) -> Bson {
        Bson::Document(doc! { "name": name, "trainer_id": trainer_id })
    }

    async fn seeded() -> (InMemoryStore, Vec<ObjectId>) {
        let store = InMemoryStore::new();
        let ids = (0..3).map(|_| ObjectId::new()).collect::<Vec<_>>();

        store
            .insert_documents(
                vec![
                    (ids[0], client("Ann", "t1")),
                    (ids[1], client("Bea", "t2")),
                    (ids[2], client("Cal", "t1")),
                ],
                "client",
            )
            .await
            .unwrap();

        (store, ids)
    }

    fn names(docs: &[Bson]) -> Vec<&str> {
        docs.iter()
            .map(|doc| doc.as_document().unwrap().get_str("name").unwrap())
            .collect()
    }

    #[tokio::test]
    async fn query_preserves_insertion_order() {
        let (store, _) = seeded().await;
        let docs = store.query_documents(Query::new(), "client").await.unwrap();

        assert_eq!(names(&docs), vec!["Ann", "Bea", "Cal"]);
    }

    #[tokio::test]
    async fn query_applies_exact_match_filter() {
        let (store, _) = seeded().await;
        let query = Query::builder().filter(Filter::eq("trainer_id", "t1")).build();
        let docs = store.query_documents(query, "client").await.unwrap();

        assert_eq!(names(&docs), vec!["Ann", "Cal"]);
    }

    #[tokio::test]
    async fn query_applies_limit_after_filter() {
        let (store, _) = seeded().await;
        let query = Query::builder()
            .filter(Filter::eq("trainer_id", "t1"))
            .limit(1)
            .build();
        let docs = store.query_documents(query, "client").await.unwrap();

        assert_eq!(names(&docs), vec!["Ann"]);
    }

    #[tokio::test]
    async fn stored_documents_carry_their_id() {
        let (store, ids) = seeded().await;
        let docs = store.get_documents(vec![ids[1]], "client").await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].as_document().unwrap().get_object_id("_id").unwrap(), ids[1]);
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let (store, ids) = seeded().await;
        let result = store
            .insert_documents(vec![(ids[0], client("Dup", "t9"))], "client")
            .await;

        assert!(matches!(result, Err(DocumentStoreError::DocumentAlreadyExists(_, _))));
    }

    #[tokio::test]
    async fn rejected_batch_writes_nothing() {
        let (store, ids) = seeded().await;
        let fresh = ObjectId::new();
        let result = store
            .insert_documents(
                vec![(fresh, client("New", "t3")), (ids[2], client("Dup", "t3"))],
                "client",
            )
            .await;

        assert!(matches!(result, Err(DocumentStoreError::DocumentAlreadyExists(_, _))));
        assert!(store.get_documents(vec![fresh], "client").await.unwrap().is_empty());

        let repeated = store
            .insert_documents(vec![(fresh, client("A", "t3")), (fresh, client("B", "t3"))], "client")
            .await;
        assert!(repeated.is_err());
        assert_eq!(store.query_documents(Query::new(), "client").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn missing_collection_is_empty() {
        let store = InMemoryStore::new();

        assert!(store.query_documents(Query::new(), "session").await.unwrap().is_empty());
        assert!(store.get_documents(vec![ObjectId::new()], "session").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_collections_is_sorted() {
        let (store, _) = seeded().await;
        store
            .insert_documents(vec![(ObjectId::new(), Bson::Document(doc! { "client_id": "c1" }))], "progress")
            .await
            .unwrap();

        assert_eq!(store.list_collections().await.unwrap(), vec!["client", "progress"]);
    }
}
