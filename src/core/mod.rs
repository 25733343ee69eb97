//! Core business logic for Vitalex.
//!
//! This module contains the export pipeline proper.
//!
//! # Modules
//!
//! - [`scheduler`] - calendar-month window splitting
//! - [`resolve`] - document-graph resolution into aggregates
//! - [`rows`] - fixed-schema row building
//! - [`sink`] - append-mode CSV output
//! - [`export`] - the outer window → record loop and reporting
//!
//! # Export Workflow
//!
//! 1. **Schedule**: split `[start, end]` into month windows
//! 2. **Cursor**: stream the window's event records with a known total
//! 3. **Resolve**: build one `FullComposition` per record, consulting
//!    the store and the window's location set
//! 4. **Classify**: birth or death, from the record title
//! 5. **Build**: map the aggregate onto the fixed row schema
//! 6. **Write**: append one CSV row per record
//! 7. **Report**: per-window outcome counts and an overall summary
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use vitalex::adapters::store::HttpDocumentStore;
//! use vitalex::config::load_config;
//! use vitalex::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vitalex.toml")?;
//! let store = Arc::new(HttpDocumentStore::new(config.store.clone())?);
//! let coordinator = ExportCoordinator::new(store, config);
//!
//! let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2022, 3, 15).unwrap();
//! let summary = coordinator.run(start, end).await?;
//!
//! println!("Births: {}", summary.births_exported());
//! println!("Deaths: {}", summary.deaths_exported());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod resolve;
pub mod rows;
pub mod scheduler;
pub mod sink;
