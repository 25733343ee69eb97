//! Observation value extraction
//!
//! Observations attached to an event's encounter are matched against a
//! fixed vocabulary of expected codes, one per named field of the
//! observation value bag. Each field has a type-specific extraction
//! rule: coded concepts yield their first coding code, quantities yield
//! the numeric value concatenated with its unit, strings pass through
//! raw. Fields with no matching observation keep their default empty
//! value; extraction never fails.
//!
//! When several observations share a code, the one with the greatest
//! `effectiveDateTime` wins; observations without a timestamp rank
//! lowest, and ties keep the first seen. Store result order never
//! decides the winner.

use crate::domain::composition::ObservationValues;
use crate::domain::records::ObservationRecord;

/// Extraction rule for one field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueShape {
    /// First coding code of a coded concept
    Coded,
    /// Numeric value, concatenated with its unit when present
    QuantityWithUnit,
    /// Raw string value
    Text,
}

/// Named fields of the observation value bag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    BirthWeight,
    AttendantAtBirth,
    BirthType,
    MannerOfDeath,
    CauseOfDeathMethod,
    CauseOfDeath,
    CauseOfDeathEstablished,
}

impl Field {
    /// The mutable slot this field writes into
    fn slot<'a>(&self, values: &'a mut ObservationValues) -> &'a mut String {
        match self {
            Field::BirthWeight => &mut values.birth_weight,
            Field::AttendantAtBirth => &mut values.attendant_at_birth,
            Field::BirthType => &mut values.birth_type,
            Field::MannerOfDeath => &mut values.manner_of_death,
            Field::CauseOfDeathMethod => &mut values.cause_of_death_method,
            Field::CauseOfDeath => &mut values.cause_of_death,
            Field::CauseOfDeathEstablished => &mut values.cause_of_death_established,
        }
    }
}

/// The fixed field ← code table. Codes outside this table are ignored.
const FIELD_TABLE: [(Field, &str, ValueShape); 7] = [
    (Field::BirthWeight, "3141-9", ValueShape::QuantityWithUnit),
    (Field::AttendantAtBirth, "73764-1", ValueShape::Coded),
    (Field::BirthType, "57722-1", ValueShape::Coded),
    (
        Field::MannerOfDeath,
        "uncertified-manner-of-death",
        ValueShape::Coded,
    ),
    (
        Field::CauseOfDeathMethod,
        "cause-of-death-method",
        ValueShape::Coded,
    ),
    (Field::CauseOfDeath, "ICD10", ValueShape::Coded),
    (
        Field::CauseOfDeathEstablished,
        "cause-of-death-established",
        ValueShape::Text,
    ),
];

/// Extracts the observation value bag from one encounter's observations
pub fn extract_values(observations: &[ObservationRecord]) -> ObservationValues {
    let mut values = ObservationValues::default();

    for (field, code, shape) in &FIELD_TABLE {
        if let Some(observation) = pick_newest(observations, code) {
            if let Some(value) = extract_value(observation, *shape) {
                *field.slot(&mut values) = value;
            }
        }
    }

    values
}

/// The matching observation with the greatest `effectiveDateTime`
///
/// ISO-8601 timestamps compare correctly as strings; a missing
/// timestamp ranks below any present one.
fn pick_newest<'a>(
    observations: &'a [ObservationRecord],
    code: &str,
) -> Option<&'a ObservationRecord> {
    let mut best: Option<&ObservationRecord> = None;

    for observation in observations.iter().filter(|o| o.primary_code() == code) {
        match best {
            None => best = Some(observation),
            Some(current) => {
                if observation.effective_date_time > current.effective_date_time {
                    best = Some(observation);
                }
            }
        }
    }

    best
}

/// Applies the shape-specific extraction rule to one observation
fn extract_value(observation: &ObservationRecord, shape: ValueShape) -> Option<String> {
    match shape {
        ValueShape::Coded => observation
            .value_codeable_concept
            .as_ref()
            .and_then(|c| c.first_code())
            .map(str::to_string),
        ValueShape::QuantityWithUnit => {
            let quantity = observation.value_quantity.as_ref()?;
            let value = quantity.value?;
            let rendered = render_number(value);
            Some(match quantity.unit.as_deref() {
                Some(unit) if !unit.is_empty() => format!("{rendered} {unit}"),
                _ => rendered,
            })
        }
        ValueShape::Text => observation.value_string.clone(),
    }
}

/// Renders a quantity value without a trailing `.0` for whole numbers
fn render_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
