//! In-memory document storage backend for trainerhub.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and is meant for development
//! and tests. Select it at runtime with `DATABASE_URL=memory://`.
//!
//! # Quick Start
//!
//! ```ignore
//! use trainerhub_core::{backend::StoreBackendBuilder, store::DocumentStore};
//! use trainerhub_memory::InMemoryStore;
//!
//! let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//! let created = store.typed_collection::<Trainer>().create(&trainer).await?;
//! ```

pub mod store;
pub mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
