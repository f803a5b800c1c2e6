//! Feature record to placement directive mapping.

use tracing::{debug, warn};

use super::context::MappingContext;
use super::directive::{PlacementDirective, Position, Scale};
use super::error::MapError;
use crate::feature::FeatureRecord;

/// A record that could not be mapped, with its index in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFeature {
    pub index: usize,
    pub error: MapError,
}

/// Result of mapping a batch.
///
/// Mapping errors are per record: offending records are skipped and listed
/// here, the rest are still mapped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingReport {
    pub directives: Vec<PlacementDirective>,
    pub skipped: Vec<SkippedFeature>,
}

impl MappingReport {
    /// True when every input record produced a directive.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Number of records that went in.
    pub fn total(&self) -> usize {
        self.directives.len() + self.skipped.len()
    }

    /// Number of directives that got the default asset.
    pub fn fallback_count(&self) -> usize {
        self.directives
            .iter()
            .filter(|d| d.asset().is_fallback())
            .count()
    }

    /// Number of directives left without an asset.
    pub fn unassigned_count(&self) -> usize {
        self.directives
            .iter()
            .filter(|d| d.asset().is_unassigned())
            .count()
    }
}

/// Maps one record using `context`. The display name is the genus.
pub fn map_record(
    record: &FeatureRecord,
    context: &MappingContext,
) -> Result<PlacementDirective, MapError> {
    build_directive(record, context, |genus| genus.to_string())
}

/// Maps feature records to placement directives.
#[derive(Debug, Clone)]
pub struct PlacementMapper {
    context: MappingContext,
}

impl PlacementMapper {
    pub fn new(context: MappingContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &MappingContext {
        &self.context
    }

    /// Maps a single record. The display name is the genus.
    pub fn map(&self, record: &FeatureRecord) -> Result<PlacementDirective, MapError> {
        map_record(record, &self.context)
    }

    /// Maps records in order, skipping the ones that fail.
    ///
    /// Directives are named `<genus>_<n>` where `n` counts the directives
    /// produced so far, starting at 0.
    pub fn map_all<'a, I>(&self, records: I) -> MappingReport
    where
        I: IntoIterator<Item = &'a FeatureRecord>,
    {
        let mut report = MappingReport::default();

        for (index, record) in records.into_iter().enumerate() {
            let ordinal = report.directives.len();
            match build_directive(record, &self.context, |genus| {
                format!("{}_{}", genus, ordinal)
            }) {
                Ok(directive) => report.directives.push(directive),
                Err(error) => {
                    warn!(index, error = %error, "Skipping feature that cannot be placed");
                    report.skipped.push(SkippedFeature { index, error });
                }
            }
        }

        debug!(
            mapped = report.directives.len(),
            skipped = report.skipped.len(),
            fallbacks = report.fallback_count(),
            unassigned = report.unassigned_count(),
            "Mapped feature batch"
        );
        report
    }
}

fn build_directive(
    record: &FeatureRecord,
    context: &MappingContext,
    display_name: impl FnOnce(&str) -> String,
) -> Result<PlacementDirective, MapError> {
    let schema = context.schema();

    let genus = required_attribute(record, &schema.genus)?;
    let crown = positive_number(record, &schema.crown)?;
    let height = positive_number(record, &schema.height)?;

    let reference = context.reference();
    let horizontal = crown / reference.crown_diameter();
    let vertical = height / reference.height();

    let point = record.coordinates();
    let position = Position {
        longitude: point.longitude,
        latitude: point.latitude,
        elevation: context.spawn_height(),
        spatial_reference: context.spatial_reference(),
    };
    let scale = Scale {
        x: horizontal,
        y: vertical,
        z: horizontal,
    };

    Ok(PlacementDirective::new(
        position,
        scale,
        display_name(genus),
        context.catalog().lookup(genus),
        record.attributes().clone(),
    ))
}

fn required_attribute<'r>(record: &'r FeatureRecord, field: &str) -> Result<&'r str, MapError> {
    record
        .attribute(field)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MapError::MissingAttribute {
            field: field.to_string(),
        })
}

fn positive_number(record: &FeatureRecord, field: &str) -> Result<f64, MapError> {
    let raw = required_attribute(record, field)?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| MapError::InvalidNumericAttribute {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{GeoPoint, SpatialReference};
    use crate::placement::{
        AssetCatalog, AssetChoice, AssetKey, AttributeSchema, MissingAssetPolicy,
        ReferenceDimensions,
    };
    use std::collections::BTreeMap;

    const SPAWN_HEIGHT: f64 = 10_000.0;

    fn tree(genus: Option<&str>, crown: Option<&str>, height: Option<&str>) -> FeatureRecord {
        let mut attributes = BTreeMap::new();
        for (key, value) in [("gattung", genus), ("kronedurch", crown), ("baumhoehe", height)] {
            if let Some(value) = value {
                attributes.insert(key.to_string(), value.to_string());
            }
        }
        FeatureRecord::new("Point", GeoPoint::new(13.3501, 52.5145), attributes)
    }

    fn context() -> MappingContext {
        MappingContext::new(
            SPAWN_HEIGHT,
            SpatialReference::WGS84,
            ReferenceDimensions::new(1.0, 1.0).unwrap(),
        )
        .unwrap()
        .with_catalog(
            AssetCatalog::new(MissingAssetPolicy::UseDefault(AssetKey::new("generic")))
                .with_entry("ACER", "maple"),
        )
    }

    #[test]
    fn test_maps_acer_to_position_and_scale() {
        let directive =
            map_record(&tree(Some("ACER"), Some("5.0"), Some("10.0")), &context()).unwrap();

        assert_eq!(
            directive.position(),
            Position {
                longitude: 13.3501,
                latitude: 52.5145,
                elevation: SPAWN_HEIGHT,
                spatial_reference: SpatialReference::WGS84,
            }
        );
        assert_eq!(
            directive.scale(),
            Scale {
                x: 5.0,
                y: 10.0,
                z: 5.0
            }
        );
        assert_eq!(directive.display_name(), "ACER");
        assert_eq!(directive.asset(), &AssetChoice::Catalog(AssetKey::new("maple")));
        assert_eq!(directive.attributes().get("kronedurch").map(String::as_str), Some("5.0"));
    }

    #[test]
    fn test_scale_divides_by_reference() {
        let context = MappingContext::new(
            0.0,
            SpatialReference::WGS84,
            ReferenceDimensions::new(2.0, 4.0).unwrap(),
        )
        .unwrap();
        let directive = map_record(&tree(Some("ACER"), Some("5"), Some("10")), &context).unwrap();
        assert_eq!(
            directive.scale(),
            Scale {
                x: 2.5,
                y: 2.5,
                z: 2.5
            }
        );
    }

    #[test]
    fn test_unmapped_genus_uses_fallback() {
        let directive =
            map_record(&tree(Some("QUERCUS"), Some("3"), Some("12")), &context()).unwrap();
        assert_eq!(directive.asset(), &AssetChoice::Fallback(AssetKey::new("generic")));
    }

    #[test]
    fn test_missing_height_is_missing_attribute() {
        let result = map_record(&tree(Some("ACER"), Some("5.0"), None), &context());
        assert_eq!(
            result,
            Err(MapError::MissingAttribute {
                field: "baumhoehe".to_string()
            })
        );
    }

    #[test]
    fn test_missing_genus_is_missing_attribute() {
        let result = map_record(&tree(None, Some("5.0"), Some("10.0")), &context());
        assert!(matches!(result, Err(MapError::MissingAttribute { field }) if field == "gattung"));
    }

    #[test]
    fn test_blank_genus_is_missing_attribute() {
        let result = map_record(&tree(Some("  "), Some("5.0"), Some("10.0")), &context());
        assert!(matches!(result, Err(MapError::MissingAttribute { .. })));
    }

    #[test]
    fn test_unparseable_crown_is_invalid_numeric() {
        let result = map_record(&tree(Some("ACER"), Some("about five"), Some("10")), &context());
        assert_eq!(
            result,
            Err(MapError::InvalidNumericAttribute {
                field: "kronedurch".to_string(),
                value: "about five".to_string()
            })
        );
    }

    #[test]
    fn test_zero_nan_and_negative_values_never_become_scales() {
        for bad in ["0", "-3", "NaN", "inf"] {
            let result = map_record(&tree(Some("ACER"), Some("5"), Some(bad)), &context());
            assert!(
                matches!(result, Err(MapError::InvalidNumericAttribute { .. })),
                "height '{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_custom_schema() {
        let context = context()
            .with_schema(AttributeSchema::new("genus", "crown", "height"))
            .unwrap();
        let mut attributes = BTreeMap::new();
        attributes.insert("genus".to_string(), "ACER".to_string());
        attributes.insert("crown".to_string(), "4".to_string());
        attributes.insert("height".to_string(), "8".to_string());
        let record = FeatureRecord::new("Point", GeoPoint::new(1.0, 2.0), attributes);

        let directive = map_record(&record, &context).unwrap();
        assert_eq!(directive.scale().y, 8.0);
    }

    #[test]
    fn test_map_all_skips_and_names_in_order() {
        let records = vec![
            tree(Some("ACER"), Some("5"), Some("10")),
            tree(Some("TILIA"), Some("4"), None),
            tree(Some("TILIA"), Some("6"), Some("20")),
            tree(Some("ACER"), Some("x"), Some("9")),
            tree(Some("ACER"), Some("3"), Some("7")),
        ];

        let report = PlacementMapper::new(context()).map_all(&records);

        let names: Vec<&str> = report.directives.iter().map(|d| d.display_name()).collect();
        assert_eq!(names, vec!["ACER_0", "TILIA_1", "ACER_2"]);
        assert_eq!(report.total(), 5);
        assert!(!report.is_complete());

        let skipped: Vec<usize> = report.skipped.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![1, 3]);
        assert!(matches!(report.skipped[0].error, MapError::MissingAttribute { .. }));
        assert!(matches!(report.skipped[1].error, MapError::InvalidNumericAttribute { .. }));
        assert_eq!(report.fallback_count(), 1);
    }

    #[test]
    fn test_unassigned_features_are_not_fallbacks() {
        let context = context().with_catalog(
            AssetCatalog::new(MissingAssetPolicy::LeaveUnassigned).with_entry("ACER", "maple"),
        );
        let records = vec![
            tree(Some("ACER"), Some("5"), Some("10")),
            tree(Some("QUERCUS"), Some("4"), Some("12")),
            tree(Some("TILIA"), Some("6"), Some("20")),
        ];

        let report = PlacementMapper::new(context).map_all(&records);

        assert_eq!(report.directives.len(), 3);
        assert_eq!(report.fallback_count(), 0);
        assert_eq!(report.unassigned_count(), 2);
    }

    #[test]
    fn test_map_all_empty() {
        let records: Vec<FeatureRecord> = Vec::new();
        let report = PlacementMapper::new(context()).map_all(&records);
        assert!(report.is_complete());
        assert_eq!(report.total(), 0);
    }
}
