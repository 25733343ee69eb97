// Vitalex - Civil Registration Vital Event Export Tool
// Copyright (c) 2025 Vitalex Contributors
// Licensed under the MIT License

//! # Vitalex - Civil Registration Vital Event Export
//!
//! Vitalex is an ETL tool built in Rust that exports civil-registration
//! vital events (births and deaths) from a FHIR-shaped document store
//! into two fixed-schema CSV files, processed in calendar-month batches.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Scheduling** an arbitrary date range into month windows
//! - **Streaming** event records through a forward-only cursor
//! - **Resolving** each record's document graph (patients, encounter,
//!   observations, related persons, locations) into one aggregate
//! - **Flattening** aggregates into fixed-column birth and death rows
//! - **Appending** rows incrementally to per-event-type CSV files
//!
//! ## Architecture
//!
//! Vitalex follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (scheduler, resolution, rows, sink, export)
//! - [`adapters`] - External integrations (document store)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`assignment`] - The single-record assignment-update collaborator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use vitalex::adapters::store::HttpDocumentStore;
//! use vitalex::config::VitalexConfig;
//! use vitalex::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = VitalexConfig::from_file("vitalex.toml")?;
//!
//!     // Construct the store handle and coordinator
//!     let store = Arc::new(HttpDocumentStore::new(config.store.clone())?);
//!     let coordinator = ExportCoordinator::new(store, config);
//!
//!     // Execute export over an inclusive date range
//!     let summary = coordinator
//!         .run(
//!             NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
//!             NaiveDate::from_ymd_opt(2022, 3, 15).unwrap(),
//!         )
//!         .await?;
//!
//!     println!(
//!         "Exported {} birth and {} death rows",
//!         summary.births_exported(),
//!         summary.deaths_exported()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! Malformed dates and an unreachable store are fatal at startup. After
//! that, failures narrow: a record whose graph doesn't resolve is
//! logged and skipped without stopping the cursor, and an individually
//! missing field silently defaults to an empty value, so every written
//! row always carries the full fixed column set.
//!
//! ## Logging
//!
//! Vitalex uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(record_id = "evt-1", "Record skipped");
//! ```

pub mod adapters;
pub mod assignment;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
