//! Event record resolution
//!
//! `CompositionResolver` turns one root event record into a
//! [`FullComposition`] by dereferencing the record's document graph:
//! patient sections are batch-fetched and filed under their roles, the
//! encounter section leads to the event location and its observation
//! set, and the related-person section leads to the informant via the
//! relationship chain.
//!
//! A reference that names a document the store cannot produce is a
//! resolution error; the caller skips that record and moves on. An
//! individually missing field (address component, extension,
//! observation) defaults silently instead.

use crate::adapters::store::DocumentStore;
use crate::core::resolve::location::LocationIndex;
use crate::core::resolve::observation::extract_values;
use crate::domain::records::{
    find_extension, EventRecord, PatientRecord, Reference, Section, TaskRecord,
};
use crate::domain::vocabulary::{
    is_excluded_section, SectionRole, EDUCATION_EXTENSION, LAST_OFFICE_EXTENSION,
    OCCUPATION_EXTENSION,
};
use crate::domain::{FullComposition, PersonSnapshot, Result, VitalexError};
use std::collections::HashMap;

/// Resolves one event record against the store and the window's
/// location set
pub struct CompositionResolver<'a> {
    store: &'a dyn DocumentStore,
    locations: &'a LocationIndex,
}

impl<'a> CompositionResolver<'a> {
    /// Creates a resolver for one window
    pub fn new(store: &'a dyn DocumentStore, locations: &'a LocationIndex) -> Self {
        Self { store, locations }
    }

    /// Builds the aggregate for one event record and its task
    ///
    /// # Errors
    ///
    /// Returns an error when a referenced document cannot be resolved
    /// or a store call fails; the caller treats this as a per-record
    /// failure and continues with the next record.
    pub async fn resolve(
        &self,
        event: &EventRecord,
        task: &TaskRecord,
    ) -> Result<FullComposition> {
        let mut composition = FullComposition::empty(&event.id, &event.date);

        // Non-clinical sections (certificates, supporting documents)
        // carry no resolvable data
        let sections: Vec<&Section> = event
            .section
            .iter()
            .filter(|s| !is_excluded_section(&s.title))
            .collect();

        self.resolve_patient_sections(&sections, &mut composition)
            .await?;
        self.resolve_encounter(&sections, task, &mut composition)
            .await?;
        self.resolve_informant(&sections, &mut composition).await?;

        Ok(composition)
    }

    /// Fetches every patient referenced by a role-mapped section in one
    /// batch call and files the snapshots under their roles
    async fn resolve_patient_sections(
        &self,
        sections: &[&Section],
        composition: &mut FullComposition,
    ) -> Result<()> {
        let mut roles: Vec<(SectionRole, String)> = Vec::new();

        for section in sections {
            let Some(role) = SectionRole::from_title(&section.title) else {
                continue; // unmapped titles are ignored, never an error
            };
            let Some(reference) = section.first_entry() else {
                continue;
            };
            if reference.resource_type() == Some("Patient") {
                roles.push((role, reference.id().to_string()));
            }
        }

        if roles.is_empty() {
            return Ok(());
        }

        let mut ids: Vec<String> = roles.iter().map(|(_, id)| id.clone()).collect();
        ids.dedup();

        let patients = self.store.patients_by_ids(&ids).await?;
        let by_id: HashMap<&str, &PatientRecord> =
            patients.iter().map(|p| (p.id.as_str(), p)).collect();

        for (role, id) in &roles {
            let patient = by_id.get(id.as_str()).ok_or_else(|| {
                VitalexError::Resolution(format!("referenced patient {id} not found"))
            })?;
            let snapshot = self.snapshot_patient(patient);

            match role {
                SectionRole::Child => composition.child = snapshot,
                SectionRole::Mother => composition.mother = snapshot,
                SectionRole::Father => composition.father = snapshot,
                SectionRole::Deceased => composition.deceased = snapshot,
                // The informant section references a RelatedPerson, not
                // a Patient; a direct patient entry under that title
                // still lands on the informant person.
                SectionRole::Informant => composition.informant.person = snapshot,
            }
        }

        Ok(())
    }

    /// Resolves the encounter section (if present) to the event
    /// location and its observations, and the task's office extension
    /// to an office name
    async fn resolve_encounter(
        &self,
        sections: &[&Section],
        task: &TaskRecord,
        composition: &mut FullComposition,
    ) -> Result<()> {
        // Office location comes from the task, independent of the
        // encounter
        if let Some(extension) = find_extension(&task.extension, LAST_OFFICE_EXTENSION) {
            if let Some(ref reference) = extension.value_reference {
                composition.locations.office = self.locations.name_of(reference.id());
            }
        }

        let Some(encounter_reference) = first_reference_of_type(sections, "Encounter") else {
            return Ok(()); // no encounter section: location fields stay empty
        };

        let encounter_id = encounter_reference.id();
        let encounter = self
            .store
            .encounter_by_id(encounter_id)
            .await?
            .ok_or_else(|| {
                VitalexError::Resolution(format!("referenced encounter {encounter_id} not found"))
            })?;

        if let Some(location_reference) = encounter.location_reference() {
            if let Some(leaf) = self.locations.get(location_reference.id()) {
                let hierarchy = self.locations.resolve_hierarchy(leaf);
                composition.locations.health_center = leaf.name.clone();
                composition.locations.district = hierarchy.district;
                composition.locations.state = hierarchy.state;
                composition.locations.city = hierarchy.city;
            }
        }

        let observations = self
            .store
            .observations_for_encounter(&format!("Encounter/{encounter_id}"))
            .await?;
        composition.observations = extract_values(&observations);

        Ok(())
    }

    /// Resolves the related-person section (if present) to the
    /// informant snapshot via the relationship chain
    async fn resolve_informant(
        &self,
        sections: &[&Section],
        composition: &mut FullComposition,
    ) -> Result<()> {
        let Some(reference) = first_reference_of_type(sections, "RelatedPerson") else {
            return Ok(());
        };

        let related_id = reference.id();
        let related = self
            .store
            .related_person_by_id(related_id)
            .await?
            .ok_or_else(|| {
                VitalexError::Resolution(format!(
                    "referenced related person {related_id} not found"
                ))
            })?;

        composition.informant.relationship = related.relationship_code().to_string();

        let Some(ref patient_reference) = related.patient else {
            return Ok(()); // relationship without a person: code only
        };

        let patient_id = patient_reference.id().to_string();
        let patients = self.store.patients_by_ids(&[patient_id.clone()]).await?;
        let patient = patients.first().ok_or_else(|| {
            VitalexError::Resolution(format!("informant patient {patient_id} not found"))
        })?;

        composition.informant.person = self.snapshot_patient(patient);
        Ok(())
    }

    /// Flattens one patient document into a snapshot, substituting
    /// district/state address ids with location names
    fn snapshot_patient(&self, patient: &PatientRecord) -> PersonSnapshot {
        let address = patient.primary_address();

        PersonSnapshot {
            first_name: patient.first_name().to_string(),
            family_name: patient.family_name().to_string(),
            gender: patient.gender.clone().unwrap_or_default(),
            birth_date: patient.birth_date.clone().unwrap_or_default(),
            deceased_date: patient.deceased_date_time.clone().unwrap_or_default(),
            marital_status: patient
                .marital_status
                .as_ref()
                .and_then(|m| m.text.clone())
                .unwrap_or_default(),
            multiple_birth: patient.multiple_birth_integer.unwrap_or(0),
            occupation: extension_string(patient, OCCUPATION_EXTENSION),
            education: extension_string(patient, EDUCATION_EXTENSION),
            city: address.and_then(|a| a.city.clone()).unwrap_or_default(),
            district: address
                .and_then(|a| a.district.as_deref())
                .map(|value| self.locations.name_or_literal(value))
                .unwrap_or_default(),
            state: address
                .and_then(|a| a.state.as_deref())
                .map(|value| self.locations.name_or_literal(value))
                .unwrap_or_default(),
        }
    }
}

/// First section entry referencing the given resource type
fn first_reference_of_type<'a>(
    sections: &[&'a Section],
    resource_type: &str,
) -> Option<&'a Reference> {
    sections
        .iter()
        .flat_map(|s| s.entry.iter())
        .find(|reference| reference.resource_type() == Some(resource_type))
}

/// String value of a patient extension, empty when absent
fn extension_string(patient: &PatientRecord, url: &str) -> String {
    find_extension(&patient.extension, url)
        .and_then(|e| e.value_string.clone())
        .unwrap_or_default()
}
