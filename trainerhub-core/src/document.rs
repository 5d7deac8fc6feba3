//! Core traits and types for record representation and serialization.
//!
//! Every entity persisted by the store implements [`Record`], which names the
//! collection it lives in. Identifiers are not part of a record: the store assigns
//! an [`ObjectId`] at creation time and hands it back alongside the record as a
//! [`Stored`] value.

use bson::{Bson, DateTime, Document, de::deserialize_from_bson, oid::ObjectId, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};

use crate::error::{DocumentStoreError, DocumentStoreResult};

/// Name of the identifier field every stored document carries.
pub const ID_FIELD: &str = "_id";

/// Timestamp fields stamped onto every document at creation.
pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Core trait that all records stored in a document store must implement.
///
/// # Example
///
/// ```ignore
/// use serde::{Serialize, Deserialize};
/// use trainerhub_core::document::Record;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Trainer {
///     pub name: String,
///     pub email: String,
/// }
///
/// impl Record for Trainer {
///     fn collection_name() -> &'static str {
///         "trainer"
///     }
/// }
/// ```
pub trait Record: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns the name of the collection this record belongs to.
    ///
    /// The collection is created on first insert if it doesn't exist.
    fn collection_name() -> &'static str;
}

/// Extension trait providing serialization utilities for records.
///
/// Automatically implemented for all types that implement [`Record`].
pub trait RecordExt: Record {
    /// Converts this record to a BSON value for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_bson(&self) -> DocumentStoreResult<Bson>;

    /// Creates a record from a BSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_bson(bson: Bson) -> DocumentStoreResult<Self>;
}

impl<D: Record> RecordExt for D {
    fn to_bson(&self) -> DocumentStoreResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    fn from_bson(bson: Bson) -> DocumentStoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }
}

/// A record together with the identifier and timestamps the store assigned to it.
///
/// Timestamps are optional so documents written by other tools still load.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<D> {
    pub id: ObjectId,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
    pub record: D,
}

impl<D: Record> Stored<D> {
    /// Splits a stored BSON document into its bookkeeping fields and typed record.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidDocument`] if the value is not a document
    /// or lacks an ObjectId `_id`, or a serialization error if the remaining fields
    /// don't match `D`.
    pub fn from_bson(bson: Bson) -> DocumentStoreResult<Self> {
        let mut document = into_document(bson)?;

        let id = match document.remove(ID_FIELD) {
            Some(Bson::ObjectId(id)) => id,
            _ => {
                return Err(DocumentStoreError::InvalidDocument(
                    "missing ObjectId _id".to_string(),
                ));
            }
        };

        let mut timestamp = |field: &str| match document.remove(field) {
            Some(Bson::DateTime(value)) => Some(value),
            _ => None,
        };
        let created_at = timestamp(CREATED_AT_FIELD);
        let updated_at = timestamp(UPDATED_AT_FIELD);

        Ok(Self {
            id,
            created_at,
            updated_at,
            record: D::from_bson(Bson::Document(document))?,
        })
    }

    /// Reassembles the document form: record fields plus `_id` and any timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not serialize to a BSON document.
    pub fn to_document(&self) -> DocumentStoreResult<Document> {
        let mut document = into_document(self.record.to_bson()?)?;
        document.insert(ID_FIELD, self.id);

        if let Some(created_at) = self.created_at {
            document.insert(CREATED_AT_FIELD, created_at);
        }
        if let Some(updated_at) = self.updated_at {
            document.insert(UPDATED_AT_FIELD, updated_at);
        }

        Ok(document)
    }
}

/// Parses the string form of an identifier.
///
/// # Errors
///
/// Returns [`DocumentStoreError::InvalidId`] if `id` is not a 24 character hex string.
pub fn parse_id(id: &str) -> DocumentStoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| DocumentStoreError::InvalidId(id.to_string()))
}

/// Unwraps a BSON value into a document, rejecting scalars and arrays.
pub fn into_document(bson: Bson) -> DocumentStoreResult<Document> {
    match bson {
        Bson::Document(document) => Ok(document),
        other => Err(DocumentStoreError::InvalidDocument(format!(
            "expected document, found {:?}",
            other.element_type()
        ))),
    }
}
