//! Document store abstraction
//!
//! This module defines the read-only contract the export pipeline has
//! with the document store. Implementations realize every method through
//! three generic store operations: a date-range cursor query with a
//! count, batch find-by-id-list (empty list = whole collection), and
//! find-by-exact-field.
//!
//! The store handle is constructed explicitly and passed down into the
//! pipeline; nothing in the crate holds a process-global connection.

use crate::domain::records::{
    EncounterRecord, EventRecord, LocationRecord, ObservationRecord, PatientRecord,
    RelatedPersonRecord, TaskRecord,
};
use crate::domain::Result;
use async_trait::async_trait;

/// Read-only query interface over the document collections
///
/// All methods are suspension points; the pipeline awaits them strictly
/// sequentially. Implementations must not cache across calls; reads are
/// eventually-consistent snapshots within one store connection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Tests that the store is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached; callers treat
    /// this as fatal at startup.
    async fn ping(&self) -> Result<()>;

    /// Total number of event records with `date` in `[from, to]`,
    /// obtained without materializing the result set
    async fn count_events(&self, from: &str, to: &str) -> Result<u64>;

    /// One page of event records with `date` in `[from, to]`
    ///
    /// Pages are fetched lazily by [`EventCursor`](super::EventCursor);
    /// callers never hold more than one page in memory.
    async fn events_page(
        &self,
        from: &str,
        to: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<EventRecord>>;

    /// The task record whose focus references the given event record
    ///
    /// Each event record maps to exactly one task; `None` means the
    /// store holds no task for it.
    async fn task_for_event(&self, event_id: &str) -> Result<Option<TaskRecord>>;

    /// Batch find of patient documents by id list
    async fn patients_by_ids(&self, ids: &[String]) -> Result<Vec<PatientRecord>>;

    /// Batch find of location documents by id list
    ///
    /// An empty id list returns the full Location collection, the only
    /// collection small enough to be loaded whole and reused.
    async fn locations_by_ids(&self, ids: &[String]) -> Result<Vec<LocationRecord>>;

    /// A single encounter document by id
    async fn encounter_by_id(&self, id: &str) -> Result<Option<EncounterRecord>>;

    /// All observations whose context references the given encounter
    async fn observations_for_encounter(
        &self,
        encounter_reference: &str,
    ) -> Result<Vec<ObservationRecord>>;

    /// A single related-person document by id
    async fn related_person_by_id(&self, id: &str) -> Result<Option<RelatedPersonRecord>>;
}
