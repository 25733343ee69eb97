//! Shared test fixtures: an in-memory document store and document
//! builders for wiring event graphs by hand.

use async_trait::async_trait;
use serde_json::json;
use vitalex::adapters::store::DocumentStore;
use vitalex::domain::records::{
    EncounterRecord, EventRecord, LocationRecord, ObservationRecord, PatientRecord,
    RelatedPersonRecord, TaskRecord,
};
use vitalex::domain::Result;

/// In-memory store holding one snapshot of every collection
#[derive(Default)]
pub struct MemoryDocumentStore {
    pub events: Vec<EventRecord>,
    pub tasks: Vec<TaskRecord>,
    pub patients: Vec<PatientRecord>,
    pub encounters: Vec<EncounterRecord>,
    pub observations: Vec<ObservationRecord>,
    pub related_persons: Vec<RelatedPersonRecord>,
    pub locations: Vec<LocationRecord>,
}

/// Date part (first 10 characters) of a date or timestamp string
fn day(value: &str) -> &str {
    if value.len() >= 10 {
        &value[..10]
    } else {
        value
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn count_events(&self, from: &str, to: &str) -> Result<u64> {
        Ok(self
            .events
            .iter()
            .filter(|e| day(&e.date) >= day(from) && day(&e.date) <= day(to))
            .count() as u64)
    }

    async fn events_page(
        &self,
        from: &str,
        to: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<EventRecord>> {
        Ok(self
            .events
            .iter()
            .filter(|e| day(&e.date) >= day(from) && day(&e.date) <= day(to))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn task_for_event(&self, event_id: &str) -> Result<Option<TaskRecord>> {
        let reference = format!("Composition/{event_id}");
        Ok(self
            .tasks
            .iter()
            .find(|t| {
                t.focus
                    .as_ref()
                    .map(|f| f.reference == reference)
                    .unwrap_or(false)
            })
            .cloned())
    }

    async fn patients_by_ids(&self, ids: &[String]) -> Result<Vec<PatientRecord>> {
        Ok(self
            .patients
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn locations_by_ids(&self, ids: &[String]) -> Result<Vec<LocationRecord>> {
        Ok(self
            .locations
            .iter()
            .filter(|l| ids.is_empty() || ids.contains(&l.id))
            .cloned()
            .collect())
    }

    async fn encounter_by_id(&self, id: &str) -> Result<Option<EncounterRecord>> {
        Ok(self.encounters.iter().find(|e| e.id == id).cloned())
    }

    async fn observations_for_encounter(
        &self,
        encounter_reference: &str,
    ) -> Result<Vec<ObservationRecord>> {
        Ok(self
            .observations
            .iter()
            .filter(|o| {
                o.context
                    .as_ref()
                    .map(|c| c.reference == encounter_reference)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn related_person_by_id(&self, id: &str) -> Result<Option<RelatedPersonRecord>> {
        Ok(self.related_persons.iter().find(|r| r.id == id).cloned())
    }
}

pub fn event(doc: serde_json::Value) -> EventRecord {
    serde_json::from_value(doc).expect("valid event fixture")
}

pub fn task(doc: serde_json::Value) -> TaskRecord {
    serde_json::from_value(doc).expect("valid task fixture")
}

pub fn patient(doc: serde_json::Value) -> PatientRecord {
    serde_json::from_value(doc).expect("valid patient fixture")
}

pub fn encounter(doc: serde_json::Value) -> EncounterRecord {
    serde_json::from_value(doc).expect("valid encounter fixture")
}

pub fn observation(doc: serde_json::Value) -> ObservationRecord {
    serde_json::from_value(doc).expect("valid observation fixture")
}

pub fn related_person(doc: serde_json::Value) -> RelatedPersonRecord {
    serde_json::from_value(doc).expect("valid related-person fixture")
}

pub fn location(doc: serde_json::Value) -> LocationRecord {
    serde_json::from_value(doc).expect("valid location fixture")
}

/// A registration task in the given business status, pointing at its
/// event record and the fixture office
pub fn registration_task(event_id: &str, status: &str) -> TaskRecord {
    task(json!({
        "id": format!("task-{event_id}"),
        "focus": {"reference": format!("Composition/{event_id}")},
        "businessStatus": {"coding": [{"code": status}]},
        "extension": [
            {
                "url": "http://opencrvs.org/specs/extension/regLastOffice",
                "valueReference": {"reference": "Location/office-1"}
            }
        ]
    }))
}

/// The standard location fixture: an office, a health facility, and
/// its district/state ancestry
pub fn location_set() -> Vec<LocationRecord> {
    vec![
        location(json!({
            "id": "office-1",
            "name": "Ibombo District Office",
            "type": {"coding": [{"code": "CRVS_OFFICE"}]}
        })),
        location(json!({
            "id": "facility-1",
            "name": "Ibombo Rural Health Centre",
            "type": {"coding": [{"code": "HEALTH_FACILITY"}]},
            "partOf": {"reference": "Location/district-1"},
            "address": {"city": "Ibombo Town"}
        })),
        location(json!({
            "id": "district-1",
            "name": "Ibombo District",
            "type": {"coding": [{"code": "ADMIN_STRUCTURE"}]},
            "partOf": {"reference": "Location/state-1"},
            "address": {"district": "district-1", "state": "state-1"}
        })),
        location(json!({
            "id": "state-1",
            "name": "Central Province",
            "type": {"coding": [{"code": "ADMIN_STRUCTURE"}]}
        })),
    ]
}
