//! Closed vocabularies shared across the pipeline
//!
//! Section titles, business statuses, extension urls, and the location
//! type tag are fixed, closed sets. Centralizing them here keeps role
//! dispatch a tagged mapping instead of ad hoc string comparisons spread
//! through the resolution code.

/// Title of a birth event record. Any other title classifies as a death
/// event for row-shape purposes.
pub const BIRTH_DECLARATION_TITLE: &str = "Birth Declaration";

/// Non-clinical section titles dropped before resolution
pub const EXCLUDED_SECTION_TITLES: [&str; 2] = ["Certificates", "Supporting Documents"];

/// Task business-status codes eligible for export
pub const EXPORTABLE_STATUSES: [&str; 2] = ["CERTIFIED", "REGISTERED"];

/// Location type-tag code marking a service-delivery point
pub const HEALTH_FACILITY_TYPE: &str = "HEALTH_FACILITY";

/// Task extension: office that last handled the record (reference value)
pub const LAST_OFFICE_EXTENSION: &str = "http://opencrvs.org/specs/extension/regLastOffice";

/// Task extension: user the record was last assigned to (reference value)
pub const LAST_USER_EXTENSION: &str = "http://opencrvs.org/specs/extension/regLastUser";

/// Patient extension: occupation (string value)
pub const OCCUPATION_EXTENSION: &str = "http://opencrvs.org/specs/extension/patient-occupation";

/// Patient extension: educational attainment (string value)
pub const EDUCATION_EXTENSION: &str =
    "http://opencrvs.org/specs/extension/educational-attainment";

/// Role a clinical section assigns to its referenced person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionRole {
    Child,
    Mother,
    Father,
    Deceased,
    Informant,
}

/// The closed section-title → role table. Titles outside this table are
/// ignored during resolution, never an error.
pub const SECTION_ROLE_TABLE: [(&str, SectionRole); 5] = [
    ("Child details", SectionRole::Child),
    ("Mother's details", SectionRole::Mother),
    ("Father's details", SectionRole::Father),
    ("Deceased details", SectionRole::Deceased),
    ("Informant's details", SectionRole::Informant),
];

impl SectionRole {
    /// Maps a section title onto its role, `None` for unmapped titles
    pub fn from_title(title: &str) -> Option<SectionRole> {
        SECTION_ROLE_TABLE
            .iter()
            .find(|(t, _)| *t == title)
            .map(|(_, role)| *role)
    }
}

/// Whether a section title names a non-clinical section that must be
/// filtered out before resolution
pub fn is_excluded_section(title: &str) -> bool {
    EXCLUDED_SECTION_TITLES.contains(&title)
}

/// Whether a business-status code gates a record into the export
pub fn is_exportable_status(status: &str) -> bool {
    EXPORTABLE_STATUSES.contains(&status)
}
