//! MongoDB backend implementation for trainerhub.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait.
//! Identifiers are stored as native ObjectIds under `_id`, and list queries use the
//! server's natural order.
//!
//! # Example
//!
//! ```ignore
//! use trainerhub_core::backend::StoreBackendBuilder;
//! use trainerhub_mongodb::MongoDbStore;
//!
//! let store = MongoDbStore::builder("mongodb://localhost:27017", "trainerhub")
//!     .build()
//!     .await?;
//! ```

pub mod store;
pub mod query;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
