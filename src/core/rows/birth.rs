//! Birth row building
//!
//! Maps a resolved aggregate onto the fixed 32-column birth schema.
//! The row starts fully defaulted and only derivable columns are
//! overwritten, so the column set and order never vary with how much
//! source data actually resolved.

use crate::domain::FullComposition;

/// Internal column keys and their upper-case header labels, in output
/// order
pub const BIRTH_COLUMNS: [(&str, &str); 32] = [
    ("officeLocation", "OFFICE LOCATION"),
    ("healthCenter", "HEALTH CENTER"),
    ("eventDistrict", "EVENT DISTRICT"),
    ("eventState", "EVENT STATE"),
    ("eventCity", "EVENT CITY"),
    ("eventDate", "EVENT DATE"),
    ("childFirstName", "CHILD FIRST NAME"),
    ("childFamilyName", "CHILD FAMILY NAME"),
    ("childGen", "CHILD GENDER"),
    ("childDOB", "CHILD DATE OF BIRTH"),
    ("multipleBirth", "MULTIPLE BIRTH"),
    ("motherFirstName", "MOTHER FIRST NAME"),
    ("motherFamilyName", "MOTHER FAMILY NAME"),
    ("motherDOB", "MOTHER DATE OF BIRTH"),
    ("motherMaritalStatus", "MOTHER MARITAL STATUS"),
    ("motherOccupation", "MOTHER OCCUPATION"),
    ("motherEducation", "MOTHER EDUCATIONAL ATTAINMENT"),
    ("motherCity", "MOTHER CITY"),
    ("motherDistrict", "MOTHER DISTRICT"),
    ("motherState", "MOTHER STATE"),
    ("fatherFirstName", "FATHER FIRST NAME"),
    ("fatherFamilyName", "FATHER FAMILY NAME"),
    ("fatherDOB", "FATHER DATE OF BIRTH"),
    ("fatherMaritalStatus", "FATHER MARITAL STATUS"),
    ("fatherOccupation", "FATHER OCCUPATION"),
    ("fatherEducation", "FATHER EDUCATIONAL ATTAINMENT"),
    ("informantFirstName", "INFORMANT FIRST NAME"),
    ("informantFamilyName", "INFORMANT FAMILY NAME"),
    ("informantRelationship", "INFORMANT RELATIONSHIP"),
    ("birthWeight", "BIRTH WEIGHT"),
    ("attendantAtBirth", "ATTENDANT AT BIRTH"),
    ("birthType", "BIRTH TYPE"),
];

/// One fully-shaped birth export row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BirthRow {
    pub office_location: String,
    pub health_center: String,
    pub event_district: String,
    pub event_state: String,
    pub event_city: String,
    pub event_date: String,
    pub child_first_name: String,
    pub child_family_name: String,
    pub child_gen: String,
    pub child_dob: String,
    pub multiple_birth: String,
    pub mother_first_name: String,
    pub mother_family_name: String,
    pub mother_dob: String,
    pub mother_marital_status: String,
    pub mother_occupation: String,
    pub mother_education: String,
    pub mother_city: String,
    pub mother_district: String,
    pub mother_state: String,
    pub father_first_name: String,
    pub father_family_name: String,
    pub father_dob: String,
    pub father_marital_status: String,
    pub father_occupation: String,
    pub father_education: String,
    pub informant_first_name: String,
    pub informant_family_name: String,
    pub informant_relationship: String,
    pub birth_weight: String,
    pub attendant_at_birth: String,
    pub birth_type: String,
}

impl BirthRow {
    /// Builds a birth row from a resolved aggregate
    ///
    /// Pure: the same aggregate always yields an identical row.
    pub fn from_composition(composition: &FullComposition) -> Self {
        let mut row = Self::default();

        row.office_location = composition.locations.office.clone();
        row.health_center = composition.locations.health_center.clone();
        row.event_district = composition.locations.district.clone();
        row.event_state = composition.locations.state.clone();
        row.event_city = composition.locations.city.clone();
        row.event_date = composition.event_date.clone();

        let child = &composition.child;
        row.child_first_name = child.first_name.clone();
        row.child_family_name = child.family_name.clone();
        row.child_gen = child.gender.clone();
        row.child_dob = child.birth_date.clone();
        row.multiple_birth = child.multiple_birth.to_string();

        let mother = &composition.mother;
        row.mother_first_name = mother.first_name.clone();
        row.mother_family_name = mother.family_name.clone();
        row.mother_dob = mother.birth_date.clone();
        row.mother_marital_status = mother.marital_status.clone();
        row.mother_occupation = mother.occupation.clone();
        row.mother_education = mother.education.clone();
        row.mother_city = mother.city.clone();
        row.mother_district = mother.district.clone();
        row.mother_state = mother.state.clone();

        let father = &composition.father;
        row.father_first_name = father.first_name.clone();
        row.father_family_name = father.family_name.clone();
        row.father_dob = father.birth_date.clone();
        row.father_marital_status = father.marital_status.clone();
        row.father_occupation = father.occupation.clone();
        row.father_education = father.education.clone();

        let informant = &composition.informant;
        row.informant_first_name = informant.person.first_name.clone();
        row.informant_family_name = informant.person.family_name.clone();
        row.informant_relationship = informant.relationship.clone();

        let observations = &composition.observations;
        row.birth_weight = observations.birth_weight.clone();
        row.attendant_at_birth = observations.attendant_at_birth.clone();
        row.birth_type = observations.birth_type.clone();

        row
    }

    /// Column values in output order; always exactly as many as
    /// [`BIRTH_COLUMNS`]
    pub fn values(&self) -> Vec<String> {
        vec![
            self.office_location.clone(),
            self.health_center.clone(),
            self.event_district.clone(),
            self.event_state.clone(),
            self.event_city.clone(),
            self.event_date.clone(),
            self.child_first_name.clone(),
            self.child_family_name.clone(),
            self.child_gen.clone(),
            self.child_dob.clone(),
            self.multiple_birth.clone(),
            self.mother_first_name.clone(),
            self.mother_family_name.clone(),
            self.mother_dob.clone(),
            self.mother_marital_status.clone(),
            self.mother_occupation.clone(),
            self.mother_education.clone(),
            self.mother_city.clone(),
            self.mother_district.clone(),
            self.mother_state.clone(),
            self.father_first_name.clone(),
            self.father_family_name.clone(),
            self.father_dob.clone(),
            self.father_marital_status.clone(),
            self.father_occupation.clone(),
            self.father_education.clone(),
            self.informant_first_name.clone(),
            self.informant_family_name.clone(),
            self.informant_relationship.clone(),
            self.birth_weight.clone(),
            self.attendant_at_birth.clone(),
            self.birth_type.clone(),
        ]
    }

    /// Header labels in output order
    pub fn headers() -> Vec<&'static str> {
        BIRTH_COLUMNS.iter().map(|(_, header)| *header).collect()
    }
}
