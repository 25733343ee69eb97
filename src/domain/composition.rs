//! The resolved event aggregate
//!
//! `FullComposition` is the normalized in-memory shape one event record
//! resolves into: event classification, role-keyed person snapshots, the
//! observation value bag, and the resolved location names. It is built
//! fresh per record, used once to populate a row, then discarded.
//!
//! Every field defaults to an empty value, so the aggregate is always
//! fully shaped regardless of how much of the document graph actually
//! resolved.

use serde::Serialize;

/// Classification of an event record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventType {
    Birth,
    Death,
}

impl EventType {
    /// Classifies an event record title. Exactly one birth title is
    /// recognized; every other title classifies as Death.
    pub fn from_title(title: &str) -> EventType {
        if title == crate::domain::vocabulary::BIRTH_DECLARATION_TITLE {
            EventType::Birth
        } else {
            EventType::Death
        }
    }

    /// Lower-case label for logging and file naming
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Birth => "birth",
            EventType::Death => "death",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flattened snapshot of one person document under a role
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonSnapshot {
    pub first_name: String,
    pub family_name: String,
    pub gender: String,
    pub birth_date: String,
    pub deceased_date: String,
    pub marital_status: String,
    pub multiple_birth: i64,
    pub occupation: String,
    pub education: String,
    pub city: String,
    pub district: String,
    pub state: String,
}

/// The informant snapshot additionally carries a relationship code
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InformantSnapshot {
    pub person: PersonSnapshot,
    pub relationship: String,
}

/// Fixed named fields extracted from the event's observations
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObservationValues {
    pub birth_weight: String,
    pub attendant_at_birth: String,
    pub birth_type: String,
    pub manner_of_death: String,
    pub cause_of_death_method: String,
    pub cause_of_death: String,
    pub cause_of_death_established: String,
}

/// Resolved location names for one event
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationNames {
    /// Office that handled the registration (from the task record)
    pub office: String,
    /// Leaf location of the event's encounter
    pub health_center: String,
    pub district: String,
    pub state: String,
    pub city: String,
}

/// One fully resolved event record, ready for row building
#[derive(Debug, Clone, Default, Serialize)]
pub struct FullComposition {
    /// Id of the source event record
    pub id: String,
    pub event_date: String,
    pub child: PersonSnapshot,
    pub mother: PersonSnapshot,
    pub father: PersonSnapshot,
    pub deceased: PersonSnapshot,
    pub informant: InformantSnapshot,
    pub observations: ObservationValues,
    pub locations: LocationNames,
}

impl FullComposition {
    /// Creates an empty aggregate for an event record id and date.
    /// All other fields stay at their defaults until resolution fills
    /// them in.
    pub fn empty(id: impl Into<String>, event_date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            event_date: event_date.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_classification() {
        assert_eq!(EventType::from_title("Birth Declaration"), EventType::Birth);
        assert_eq!(EventType::from_title("Death Declaration"), EventType::Death);
        // Unrecognized titles classify as Death (inherited behavior)
        assert_eq!(EventType::from_title("Marriage Notice"), EventType::Death);
        assert_eq!(EventType::from_title(""), EventType::Death);
    }

    #[test]
    fn test_event_type_display() {
        assert_eq!(EventType::Birth.to_string(), "birth");
        assert_eq!(EventType::Death.to_string(), "death");
    }

    #[test]
    fn test_empty_aggregate_is_fully_shaped() {
        let composition = FullComposition::empty("evt-1", "2022-02-03");

        assert_eq!(composition.id, "evt-1");
        assert_eq!(composition.event_date, "2022-02-03");
        assert_eq!(composition.child, PersonSnapshot::default());
        assert_eq!(composition.mother, PersonSnapshot::default());
        assert_eq!(composition.informant, InformantSnapshot::default());
        assert_eq!(composition.observations, ObservationValues::default());
        assert_eq!(composition.locations, LocationNames::default());
    }

    #[test]
    fn test_person_snapshot_defaults() {
        let snapshot = PersonSnapshot::default();
        assert_eq!(snapshot.first_name, "");
        assert_eq!(snapshot.gender, "");
        assert_eq!(snapshot.multiple_birth, 0);
    }
}
