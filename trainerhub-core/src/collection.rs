//! Collection types for document store operations.
//!
//! [`TypedCollection`] binds a collection to one [`Record`] type. It is a cheap view
//! borrowed from a [`DocumentStore`](crate::store::DocumentStore) and works on top of
//! an untyped collection that handles raw BSON.
//!
//! # Example
//!
//! ```ignore
//! let trainers = store.typed_collection::<Trainer>();
//! let created = trainers.create(&trainer).await?;
//! let all = trainers.list(None, 100).await?;
//! ```

use bson::{Bson, DateTime, Document, oid::ObjectId};
use std::marker::PhantomData;

use crate::{
    backend::StoreBackend,
    document::{CREATED_AT_FIELD, ID_FIELD, Record, RecordExt, Stored, UPDATED_AT_FIELD, into_document},
    error::DocumentStoreResult,
    query::{Expr, Query},
};

/// An untyped collection with a reference to a storage backend.
#[derive(Debug)]
struct Collection<'a> {
    name: String,
    backend: &'a dyn StoreBackend,
}

impl<'a> Collection<'a> {
    fn new(name: String, backend: &'a dyn StoreBackend) -> Self {
        Self { name, backend }
    }

    /// Persists a document under a freshly assigned identifier.
    ///
    /// The document is stamped with `created_at` and `updated_at` before it is written,
    /// and returned as written.
    async fn create(&self, document: Bson) -> DocumentStoreResult<Document> {
        let mut document = into_document(document)?;
        let now = DateTime::now();
        document.insert(CREATED_AT_FIELD, now);
        document.insert(UPDATED_AT_FIELD, now);

        let id = ObjectId::new();
        self.backend
            .insert_documents(vec![(id, Bson::Document(document.clone()))], &self.name)
            .await?;

        document.insert(ID_FIELD, id);
        Ok(document)
    }

    async fn get(&self, id: ObjectId) -> DocumentStoreResult<Option<Bson>> {
        Ok(self
            .backend
            .get_documents(vec![id], &self.name)
            .await?
            .into_iter()
            .next())
    }

    /// A `None` filter matches every document.
    async fn list(&self, filter: Option<Expr>, limit: usize) -> DocumentStoreResult<Vec<Bson>> {
        self.backend
            .query_documents(
                Query::builder()
                    .maybe_filter(filter)
                    .limit(limit)
                    .build(),
                &self.name,
            )
            .await
    }
}

/// A collection bound to a [`Record`] type.
///
/// Records are serialized to BSON on the way in and deserialized into
/// [`Stored`] values on the way out.
#[derive(Debug)]
pub struct TypedCollection<'a, D: Record> {
    inner: Collection<'a>,
    _marker: PhantomData<D>,
}

impl<'a, D: Record> TypedCollection<'a, D> {
    pub(crate) fn new(backend: &'a dyn StoreBackend) -> Self {
        Self {
            inner: Collection::new(D::collection_name().to_string(), backend),
            _marker: PhantomData,
        }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Persists a record and returns it with its new identifier and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not serialize to a document or the
    /// backend write fails.
    pub async fn create(&self, record: &D) -> DocumentStoreResult<Stored<D>> {
        let document = self.inner.create(record.to_bson()?).await?;
        Stored::from_bson(Bson::Document(document))
    }

    /// Retrieves a single record by identifier.
    pub async fn get(&self, id: ObjectId) -> DocumentStoreResult<Option<Stored<D>>> {
        self.inner
            .get(id)
            .await?
            .map(Stored::from_bson)
            .transpose()
    }

    /// Returns up to `limit` records matching `filter` in natural order.
    pub async fn list(&self, filter: Option<Expr>, limit: usize) -> DocumentStoreResult<Vec<Stored<D>>> {
        self.inner
            .list(filter, limit)
            .await?
            .into_iter()
            .map(Stored::from_bson)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use std::sync::Mutex;

    use crate::{error::DocumentStoreError, store::DocumentStore};

    /// Records writes and replays them for every read, ignoring filters.
    #[derive(Debug, Default)]
    struct RecordingBackend {
        written: Mutex<Vec<(String, Bson)>>,
    }

    #[async_trait]
    impl StoreBackend for RecordingBackend {
        async fn insert_documents(
            &self,
            documents: Vec<(ObjectId, Bson)>,
            collection: &str,
        ) -> DocumentStoreResult<()> {
            let mut written = self.written.lock().map_err(|e| DocumentStoreError::Backend(e.to_string()))?;
            for (id, document) in documents {
                let mut document = into_document(document)?;
                document.insert(ID_FIELD, id);
                written.push((collection.to_string(), Bson::Document(document)));
            }
            Ok(())
        }

        async fn get_documents(&self, _ids: Vec<ObjectId>, collection: &str) -> DocumentStoreResult<Vec<Bson>> {
            self.query_documents(Query::new(), collection).await
        }

        async fn query_documents(&self, _query: Query, collection: &str) -> DocumentStoreResult<Vec<Bson>> {
            let written = self.written.lock().map_err(|e| DocumentStoreError::Backend(e.to_string()))?;
            Ok(written
                .iter()
                .filter(|(name, _)| name == collection)
                .map(|(_, document)| document.clone())
                .collect())
        }

        async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
            Ok(vec![])
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Badge {
        label: String,
    }

    impl Record for Badge {
        fn collection_name() -> &'static str {
            "badge"
        }
    }

    /// Serializes to a string, which is not a document.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Label(String);

    impl Record for Label {
        fn collection_name() -> &'static str {
            "label"
        }
    }

    #[tokio::test]
    async fn create_stamps_timestamps() {
        let store = DocumentStore::new(RecordingBackend::default());
        let created = store
            .typed_collection::<Badge>()
            .create(&Badge { label: "gold".to_string() })
            .await
            .unwrap();

        assert!(created.created_at.is_some());
        assert_eq!(created.created_at, created.updated_at);

        let listed = store.typed_collection::<Badge>().list(None, 10).await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn create_rejects_non_documents() {
        let store = DocumentStore::new(RecordingBackend::default());
        let result = store
            .typed_collection::<Label>()
            .create(&Label("loose".to_string()))
            .await;

        assert!(matches!(result, Err(DocumentStoreError::InvalidDocument(_))));
    }

    #[tokio::test]
    async fn typed_collection_round_trips_records() {
        let store = DocumentStore::new(RecordingBackend::default());
        let badges = store.typed_collection::<Badge>();
        let badge = Badge { label: "silver".to_string() };

        let created = badges.create(&badge).await.unwrap();
        let fetched = badges.get(created.id).await.unwrap().unwrap();

        assert_eq!(badges.name(), "badge");
        assert_eq!(fetched.record, badge);
        assert_eq!(fetched, created);
    }
}
