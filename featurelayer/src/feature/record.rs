//! Parsed feature records.

use std::collections::BTreeMap;

use crate::coord::GeoPoint;

/// One feature from a feature collection: geometry plus string attributes.
///
/// Records are read-only once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    geometry_type: String,
    coordinates: GeoPoint,
    attributes: BTreeMap<String, String>,
}

impl FeatureRecord {
    pub fn new(
        geometry_type: impl Into<String>,
        coordinates: GeoPoint,
        attributes: BTreeMap<String, String>,
    ) -> Self {
        Self {
            geometry_type: geometry_type.into(),
            coordinates,
            attributes,
        }
    }

    /// Geometry type tag as sent by the service (e.g. `Point`).
    pub fn geometry_type(&self) -> &str {
        &self.geometry_type
    }

    /// The first two coordinate components (x = longitude, y = latitude).
    pub fn coordinates(&self) -> GeoPoint {
        self.coordinates
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Looks up a single attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
