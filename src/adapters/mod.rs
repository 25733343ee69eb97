//! External system integrations for Vitalex.
//!
//! This module provides adapters for the systems the pipeline talks to:
//!
//! - [`store`] - the read-only document store (trait-based, with an HTTP
//!   search implementation)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external
//! dependencies and enable testing with in-memory implementations. The
//! pipeline only ever sees the [`store::DocumentStore`] trait; the
//! concrete handle is constructed once per run and passed down.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vitalex::adapters::store::{DocumentStore, HttpDocumentStore};
//! use vitalex::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vitalex.toml")?;
//! let store: Arc<dyn DocumentStore> = Arc::new(HttpDocumentStore::new(config.store.clone())?);
//! store.ping().await?;
//! # Ok(())
//! # }
//! ```

pub mod store;
