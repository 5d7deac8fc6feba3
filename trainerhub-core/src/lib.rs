//! Document access layer for trainerhub.
//!
//! This crate provides:
//!
//! - **Record traits** ([`document`]) - The trait every persisted entity implements
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Query and filtering API** ([`query`]) - Exact-match filters and limits
//! - **Collections interface** ([`collection`]) - Create, get and list within one collection
//! - **Document store** ([`store`]) - Shareable handle over the configured backend
//! - **Wire normalization** ([`wire`]) - Stored documents to outbound JSON
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use trainerhub_core::{document::Record, store::DocumentStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Trainer {
//!     pub name: String,
//!     pub email: String,
//! }
//!
//! impl Record for Trainer {
//!     fn collection_name() -> &'static str {
//!         "trainer"
//!     }
//! }
//!
//! let store = DocumentStore::new(backend);
//! let created = store.typed_collection::<Trainer>().create(&trainer).await?;
//! ```

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod query;
pub mod store;
pub mod wire;
