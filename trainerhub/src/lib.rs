//! HTTP service for a personal-training practice.
//!
//! Trainers, clients, programs, sessions and progress check-ins are validated against
//! [`schema`], persisted through a [`trainerhub_core::store::DocumentStore`] and
//! returned with their identifiers rendered as hex strings.
//!
//! # Quick Start
//!
//! ```ignore
//! use trainerhub::{api::{create_routes, AppState}, config::AppConfig};
//!
//! let config = AppConfig::from_env()?;
//! let store = config.database.connect().await?;
//! let app = create_routes(AppState::new(store, config.database.clone()));
//! ```

pub mod api;
pub mod config;
pub mod schema;
