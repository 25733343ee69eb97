//! Assignment collaborator
//!
//! A narrow, self-contained service separate from the export pipeline:
//! given one task record (the root event record already dereferenced),
//! it derives the record's search-index assignment document and upserts
//! it: one document, one write, no batching, no retries.
//!
//! The assigned user's name comes from an external user-lookup call;
//! the office name from the Location collection. A task with no
//! assigned-user extension takes the removal path, writing a document
//! with a null assignment.

pub mod service;

pub use service::{AssignmentService, HttpSearchIndexWriter, HttpUserDirectory};

use crate::domain::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Assignment details for one record's search-index document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetails {
    pub office_name: String,
    pub practitioner_id: String,
    pub first_name: String,
    pub last_name: String,
}

/// The derived search-index document, keyed by the root record's id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<i64>,
    pub assignment: Option<AssignmentDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl AssignmentDocument {
    /// Document for an assigned record
    pub fn assigned(modified_at: i64, details: AssignmentDetails, updated_by: String) -> Self {
        Self {
            modified_at: Some(modified_at),
            assignment: Some(details),
            updated_by: Some(updated_by),
        }
    }

    /// Document for the removal path: assignment null, nothing else
    pub fn removed() -> Self {
        Self {
            modified_at: None,
            assignment: None,
            updated_by: None,
        }
    }
}

/// A user looked up in the external directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub first_name: String,
    pub last_name: String,
}

/// External user-lookup, keyed by user id
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves a user's display name
    async fn user_by_id(&self, user_id: &str) -> Result<UserDetails>;
}

/// Upsert target for derived assignment documents
#[async_trait]
pub trait SearchIndexWriter: Send + Sync {
    /// Upserts the assignment document for one record
    async fn upsert_assignment(&self, record_id: &str, document: &AssignmentDocument)
        -> Result<()>;
}
