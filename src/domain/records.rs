//! Typed document records for the store collections
//!
//! This module defines the document shapes Vitalex reads from the store,
//! one type per collection. The shapes are deliberately partial: only the
//! attributes the export pipeline consumes are modelled, everything else
//! in the source documents is ignored by serde.
//!
//! Deserializing into these types at the adapter boundary doubles as
//! validation: a document that doesn't fit its shape surfaces as a
//! recoverable store error instead of a crash deep in resolution logic.

use serde::{Deserialize, Serialize};

/// A cross-document reference in `Type/id` form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Literal reference string, e.g. `Patient/8f6e…`
    #[serde(default)]
    pub reference: String,
}

impl Reference {
    /// Creates a reference from a resource type and id
    pub fn new(resource_type: &str, id: &str) -> Self {
        Self {
            reference: format!("{resource_type}/{id}"),
        }
    }

    /// The id part of the reference (after the last `/`), or the whole
    /// string when the reference carries no type prefix
    pub fn id(&self) -> &str {
        self.reference
            .rsplit_once('/')
            .map(|(_, id)| id)
            .unwrap_or(&self.reference)
    }

    /// The resource-type part of the reference, if present
    pub fn resource_type(&self) -> Option<&str> {
        self.reference.rsplit_once('/').map(|(ty, _)| ty)
    }
}

/// A single coding within a codeable concept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default)]
    pub code: String,
}

/// A coded value with optional free text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    #[serde(default)]
    pub coding: Vec<Coding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// Code of the first coding, if any
    pub fn first_code(&self) -> Option<&str> {
        self.coding.first().map(|c| c.code.as_str())
    }
}

/// A measured value with a unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A person name (given names + family name)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(default)]
    pub given: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

/// An address; district and state may hold Location ids rather than
/// literal names, substituted during resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A url-keyed extension carrying either a string or a reference value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_reference: Option<Reference>,
}

/// Finds an extension by url within an extension list
pub fn find_extension<'a>(extensions: &'a [Extension], url: &str) -> Option<&'a Extension> {
    extensions.iter().find(|e| e.url == url)
}

/// One typed section of an event record, referencing other documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub entry: Vec<Reference>,
}

impl Section {
    /// First entry reference of the section, if any
    pub fn first_entry(&self) -> Option<&Reference> {
        self.entry.first()
    }
}

/// Root document for one registered birth or death declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    /// Event-type label, e.g. `Birth Declaration`
    #[serde(default)]
    pub title: String,
    /// Declaration date, ISO-8601
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub section: Vec<Section>,
}

/// Workflow document tracking an event record's processing state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    /// Reference back to the event record this task tracks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_status: Option<CodeableConcept>,
    #[serde(default)]
    pub extension: Vec<Extension>,
}

impl TaskRecord {
    /// Business-status code of the first coding, empty when absent
    pub fn status_code(&self) -> &str {
        self.business_status
            .as_ref()
            .and_then(|c| c.first_code())
            .unwrap_or("")
    }
}

/// A person document (child, parent, deceased, or informant's patient)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: String,
    #[serde(default)]
    pub name: Vec<HumanName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deceased_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_birth_integer: Option<i64>,
    #[serde(default)]
    pub address: Vec<Address>,
    #[serde(default)]
    pub extension: Vec<Extension>,
}

impl PatientRecord {
    /// First given name of the first recorded name
    pub fn first_name(&self) -> &str {
        self.name
            .first()
            .and_then(|n| n.given.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Family name of the first recorded name
    pub fn family_name(&self) -> &str {
        self.name
            .first()
            .and_then(|n| n.family.as_deref())
            .unwrap_or("")
    }

    /// First address entry, if any
    pub fn primary_address(&self) -> Option<&Address> {
        self.address.first()
    }
}

/// Location assignment within an encounter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterLocation {
    #[serde(default)]
    pub location: Reference,
}

/// Document linking an event to a service-delivery location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub id: String,
    #[serde(default)]
    pub location: Vec<EncounterLocation>,
}

impl EncounterRecord {
    /// Reference to the encounter's first location, if any
    pub fn location_reference(&self) -> Option<&Reference> {
        self.location.first().map(|l| &l.location)
    }
}

/// Coded, typed measurement or fact attached to an encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
    /// Reference to the encounter this observation belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_quantity: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_codeable_concept: Option<CodeableConcept>,
}

impl ObservationRecord {
    /// Code of the observation's primary (first) coding, empty when absent
    pub fn primary_code(&self) -> &str {
        self.code
            .as_ref()
            .and_then(|c| c.first_code())
            .unwrap_or("")
    }
}

/// Document representing a non-patient participant (e.g. informant)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedPersonRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<Reference>,
}

impl RelatedPersonRecord {
    /// Relationship code of the first coding, empty when absent
    pub fn relationship_code(&self) -> &str {
        self.relationship
            .as_ref()
            .and_then(|c| c.first_code())
            .unwrap_or("")
    }
}

/// An administrative area or service-delivery point
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Type tag distinguishing health facilities from administrative areas
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub location_type: Option<CodeableConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl LocationRecord {
    /// Whether this location is a service-delivery point (health facility)
    /// rather than an administrative area
    pub fn is_health_facility(&self) -> bool {
        self.location_type
            .as_ref()
            .and_then(|t| t.first_code())
            .map(|code| code == crate::domain::vocabulary::HEALTH_FACILITY_TYPE)
            .unwrap_or(false)
    }
}
