//! Death row building
//!
//! Maps a resolved aggregate onto the fixed 23-column death schema,
//! with the same full-default scaffolding as the birth row.

use crate::domain::FullComposition;

/// Internal column keys and their upper-case header labels, in output
/// order
pub const DEATH_COLUMNS: [(&str, &str); 23] = [
    ("officeLocation", "OFFICE LOCATION"),
    ("healthCenter", "HEALTH CENTER"),
    ("eventDistrict", "EVENT DISTRICT"),
    ("eventState", "EVENT STATE"),
    ("eventCity", "EVENT CITY"),
    ("eventDate", "EVENT DATE"),
    ("deceasedFirstName", "DECEASED FIRST NAME"),
    ("deceasedFamilyName", "DECEASED FAMILY NAME"),
    ("deceasedGen", "DECEASED GENDER"),
    ("deceasedDOB", "DECEASED DATE OF BIRTH"),
    ("deceasedDOD", "DECEASED DATE OF DEATH"),
    ("deceasedMaritalStatus", "DECEASED MARITAL STATUS"),
    ("deceasedOccupation", "DECEASED OCCUPATION"),
    ("deceasedCity", "DECEASED CITY"),
    ("deceasedDistrict", "DECEASED DISTRICT"),
    ("deceasedState", "DECEASED STATE"),
    ("informantFirstName", "INFORMANT FIRST NAME"),
    ("informantFamilyName", "INFORMANT FAMILY NAME"),
    ("informantRelationship", "INFORMANT RELATIONSHIP"),
    ("mannerOfDeath", "MANNER OF DEATH"),
    ("causeOfDeathMethod", "CAUSE OF DEATH METHOD"),
    ("causeOfDeath", "CAUSE OF DEATH"),
    ("causeOfDeathEstablished", "CAUSE OF DEATH ESTABLISHED"),
];

/// One fully-shaped death export row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeathRow {
    pub office_location: String,
    pub health_center: String,
    pub event_district: String,
    pub event_state: String,
    pub event_city: String,
    pub event_date: String,
    pub deceased_first_name: String,
    pub deceased_family_name: String,
    pub deceased_gen: String,
    pub deceased_dob: String,
    pub deceased_dod: String,
    pub deceased_marital_status: String,
    pub deceased_occupation: String,
    pub deceased_city: String,
    pub deceased_district: String,
    pub deceased_state: String,
    pub informant_first_name: String,
    pub informant_family_name: String,
    pub informant_relationship: String,
    pub manner_of_death: String,
    pub cause_of_death_method: String,
    pub cause_of_death: String,
    pub cause_of_death_established: String,
}

impl DeathRow {
    /// Builds a death row from a resolved aggregate
    ///
    /// `causeOfDeathEstablished` renders as the literal `Yes` when any
    /// value was extracted for it and `No` otherwise, never the raw code.
    pub fn from_composition(composition: &FullComposition) -> Self {
        let mut row = Self::default();

        row.office_location = composition.locations.office.clone();
        row.health_center = composition.locations.health_center.clone();
        row.event_district = composition.locations.district.clone();
        row.event_state = composition.locations.state.clone();
        row.event_city = composition.locations.city.clone();
        row.event_date = composition.event_date.clone();

        let deceased = &composition.deceased;
        row.deceased_first_name = deceased.first_name.clone();
        row.deceased_family_name = deceased.family_name.clone();
        row.deceased_gen = deceased.gender.clone();
        row.deceased_dob = deceased.birth_date.clone();
        row.deceased_dod = deceased.deceased_date.clone();
        row.deceased_marital_status = deceased.marital_status.clone();
        row.deceased_occupation = deceased.occupation.clone();
        row.deceased_city = deceased.city.clone();
        row.deceased_district = deceased.district.clone();
        row.deceased_state = deceased.state.clone();

        let informant = &composition.informant;
        row.informant_first_name = informant.person.first_name.clone();
        row.informant_family_name = informant.person.family_name.clone();
        row.informant_relationship = informant.relationship.clone();

        let observations = &composition.observations;
        row.manner_of_death = observations.manner_of_death.clone();
        row.cause_of_death_method = observations.cause_of_death_method.clone();
        row.cause_of_death = observations.cause_of_death.clone();
        row.cause_of_death_established =
            if observations.cause_of_death_established.is_empty() {
                "No".to_string()
            } else {
                "Yes".to_string()
            };

        row
    }

    /// Column values in output order; always exactly as many as
    /// [`DEATH_COLUMNS`]
    pub fn values(&self) -> Vec<String> {
        vec![
            self.office_location.clone(),
            self.health_center.clone(),
            self.event_district.clone(),
            self.event_state.clone(),
            self.event_city.clone(),
            self.event_date.clone(),
            self.deceased_first_name.clone(),
            self.deceased_family_name.clone(),
            self.deceased_gen.clone(),
            self.deceased_dob.clone(),
            self.deceased_dod.clone(),
            self.deceased_marital_status.clone(),
            self.deceased_occupation.clone(),
            self.deceased_city.clone(),
            self.deceased_district.clone(),
            self.deceased_state.clone(),
            self.informant_first_name.clone(),
            self.informant_family_name.clone(),
            self.informant_relationship.clone(),
            self.manner_of_death.clone(),
            self.cause_of_death_method.clone(),
            self.cause_of_death.clone(),
            self.cause_of_death_established.clone(),
        ]
    }

    /// Header labels in output order
    pub fn headers() -> Vec<&'static str> {
        DEATH_COLUMNS.iter().map(|(_, header)| *header).collect()
    }
}
