//! Location hierarchy resolution
//!
//! The Location collection mixes two structurally different documents:
//! service-delivery points (health facilities) whose administrative
//! ancestry hangs off `partOf` references, and administrative areas
//! (districts, states) that reference their district/state as sibling
//! ids in their own address. Resolution branches on the type tag:
//!
//! - health facility: district = `partOf(leaf)`, state =
//!   `partOf(partOf(leaf))`, at most two ancestor hops;
//! - administrative area: district/state come from the leaf's own
//!   address fields, `partOf` is ignored.
//!
//! The city is always taken from the leaf's own address. A missing
//! ancestor or address id yields an empty name, never an error.

use crate::domain::records::LocationRecord;
use std::collections::HashMap;

/// Resolved administrative ancestry for one leaf location
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedHierarchy {
    pub district: String,
    pub state: String,
    pub city: String,
}

/// Read-only lookup over the full location set of one window
pub struct LocationIndex {
    by_id: HashMap<String, LocationRecord>,
}

impl LocationIndex {
    /// Builds an index from the full location set
    pub fn new(locations: Vec<LocationRecord>) -> Self {
        let by_id = locations
            .into_iter()
            .map(|location| (location.id.clone(), location))
            .collect();
        Self { by_id }
    }

    /// Number of indexed locations
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the index holds no locations
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Location by id
    pub fn get(&self, id: &str) -> Option<&LocationRecord> {
        self.by_id.get(id)
    }

    /// Name of the location with the given id, empty when unknown
    pub fn name_of(&self, id: &str) -> String {
        self.get(id).map(|l| l.name.clone()).unwrap_or_default()
    }

    /// Substitutes a location id with its name; values that don't
    /// resolve to a location pass through as literals
    pub fn name_or_literal(&self, value: &str) -> String {
        match self.get(value) {
            Some(location) => location.name.clone(),
            None => value.to_string(),
        }
    }

    /// Resolves district, state, and city for a leaf location
    pub fn resolve_hierarchy(&self, leaf: &LocationRecord) -> ResolvedHierarchy {
        let city = leaf
            .address
            .as_ref()
            .and_then(|a| a.city.clone())
            .unwrap_or_default();

        if leaf.is_health_facility() {
            let district = leaf
                .part_of
                .as_ref()
                .and_then(|reference| self.get(reference.id()));
            let state = district
                .and_then(|d| d.part_of.as_ref())
                .and_then(|reference| self.get(reference.id()));

            ResolvedHierarchy {
                district: district.map(|l| l.name.clone()).unwrap_or_default(),
                state: state.map(|l| l.name.clone()).unwrap_or_default(),
                city,
            }
        } else {
            let address = leaf.address.as_ref();
            let district = address
                .and_then(|a| a.district.as_deref())
                .map(|id| self.name_of(id))
                .unwrap_or_default();
            let state = address
                .and_then(|a| a.state.as_deref())
                .map(|id| self.name_of(id))
                .unwrap_or_default();

            ResolvedHierarchy {
                district,
                state,
                city,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location(doc: serde_json::Value) -> LocationRecord {
        serde_json::from_value(doc).unwrap()
    }

    fn fixture_index() -> LocationIndex {
        LocationIndex::new(vec![
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
                "address": {"district": "district-1", "state": "state-1", "city": "Ibombo Town"}
            })),
            location(json!({
                "id": "state-1",
                "name": "Central Province",
                "type": {"coding": [{"code": "ADMIN_STRUCTURE"}]}
            })),
        ])
    }

    #[test]
    fn test_health_facility_walks_ancestors() {
        let index = fixture_index();
        let leaf = index.get("facility-1").unwrap().clone();

        let hierarchy = index.resolve_hierarchy(&leaf);
        assert_eq!(hierarchy.district, "Ibombo District");
        assert_eq!(hierarchy.state, "Central Province");
        assert_eq!(hierarchy.city, "Ibombo Town");
    }

    #[test]
    fn test_health_facility_ignores_address_district() {
        // The facility's address names a different district; the walk
        // must still follow partOf, independent of address fields.
        let index = fixture_index();
        let leaf = location(json!({
            "id": "facility-2",
            "name": "Other Clinic",
            "type": {"coding": [{"code": "HEALTH_FACILITY"}]},
            "partOf": {"reference": "Location/district-1"},
            "address": {"district": "state-1", "state": "district-1"}
        }));

        let hierarchy = index.resolve_hierarchy(&leaf);
        assert_eq!(hierarchy.district, "Ibombo District");
        assert_eq!(hierarchy.state, "Central Province");
    }

    #[test]
    fn test_administrative_leaf_uses_sibling_lookups() {
        let index = fixture_index();
        let leaf = index.get("district-1").unwrap().clone();

        let hierarchy = index.resolve_hierarchy(&leaf);
        assert_eq!(hierarchy.district, "Ibombo District");
        assert_eq!(hierarchy.state, "Central Province");
        assert_eq!(hierarchy.city, "Ibombo Town");
    }

    #[test]
    fn test_administrative_leaf_ignores_part_of() {
        let index = fixture_index();
        let leaf = location(json!({
            "id": "district-2",
            "name": "Detached District",
            "type": {"coding": [{"code": "ADMIN_STRUCTURE"}]},
            "partOf": {"reference": "Location/state-1"}
        }));

        // No address fields, so district/state stay empty even though
        // partOf would resolve.
        let hierarchy = index.resolve_hierarchy(&leaf);
        assert_eq!(hierarchy.district, "");
        assert_eq!(hierarchy.state, "");
    }

    #[test]
    fn test_missing_ancestor_yields_empty_names() {
        let index = LocationIndex::new(vec![location(json!({
            "id": "facility-3",
            "name": "Orphan Clinic",
            "type": {"coding": [{"code": "HEALTH_FACILITY"}]},
            "partOf": {"reference": "Location/missing"}
        }))]);
        let leaf = index.get("facility-3").unwrap().clone();

        let hierarchy = index.resolve_hierarchy(&leaf);
        assert_eq!(hierarchy, ResolvedHierarchy::default());
    }

    #[test]
    fn test_name_or_literal() {
        let index = fixture_index();
        assert_eq!(index.name_or_literal("district-1"), "Ibombo District");
        assert_eq!(index.name_or_literal("Lusaka"), "Lusaka");
    }

    #[test]
    fn test_name_of_unknown_is_empty() {
        let index = fixture_index();
        assert_eq!(index.name_of("missing"), "");
    }
}
