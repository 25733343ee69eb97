//! Domain models and types for Vitalex.
//!
//! This module contains the core domain models, types, and business rules
//! for the export pipeline.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Typed document records** per store collection ([`records`])
//! - **The resolved event aggregate** ([`FullComposition`])
//! - **Closed vocabularies** for titles, roles, statuses ([`vocabulary`])
//! - **Error types** ([`VitalexError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, VitalexError>`]:
//!
//! ```rust
//! use vitalex::domain::{Result, VitalexError};
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     let config = vitalex::config::VitalexConfig::from_file("vitalex.toml")?;
//!     Ok(())
//! }
//! ```

pub mod composition;
pub mod errors;
pub mod records;
pub mod result;
pub mod vocabulary;

// Re-export commonly used types for convenience
pub use composition::{
    EventType, FullComposition, InformantSnapshot, LocationNames, ObservationValues,
    PersonSnapshot,
};
pub use errors::{StoreError, VitalexError};
pub use records::{
    EncounterRecord, EventRecord, LocationRecord, ObservationRecord, PatientRecord,
    RelatedPersonRecord, TaskRecord,
};
pub use result::Result;
pub use vocabulary::SectionRole;
