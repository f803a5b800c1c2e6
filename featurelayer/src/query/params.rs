//! Query parameter types.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::coord::{GeoPoint, SpatialReference};

/// Response format requested with the `f` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// GeoJSON feature collection
    #[default]
    GeoJson,
    /// Esri JSON
    Json,
    /// Pretty-printed Esri JSON
    PJson,
}

impl OutputFormat {
    /// The value sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::GeoJson => "geojson",
            OutputFormat::Json => "json",
            OutputFormat::PJson => "pjson",
        }
    }
}

/// Linear units understood by the `units` parameter of a distance query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Meter,
    Kilometer,
    Foot,
    StatuteMile,
}

impl DistanceUnit {
    /// The Esri unit constant sent on the wire.
    pub fn esri_name(&self) -> &'static str {
        match self {
            DistanceUnit::Meter => "esriSRUnit_Meter",
            DistanceUnit::Kilometer => "esriSRUnit_Kilometer",
            DistanceUnit::Foot => "esriSRUnit_Foot",
            DistanceUnit::StatuteMile => "esriSRUnit_StatuteMile",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(DistanceUnit::Meter),
            "km" | "kilometer" | "kilometers" => Ok(DistanceUnit::Kilometer),
            "ft" | "foot" | "feet" => Ok(DistanceUnit::Foot),
            "mi" | "mile" | "miles" => Ok(DistanceUnit::StatuteMile),
            other => Err(format!(
                "unknown unit '{}' (expected meter, kilometer, foot or mile)",
                other
            )),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistanceUnit::Meter => "meter",
            DistanceUnit::Kilometer => "kilometer",
            DistanceUnit::Foot => "foot",
            DistanceUnit::StatuteMile => "mile",
        };
        f.write_str(name)
    }
}

/// Attribute-based `where` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeFilter {
    /// `field = 'value'`, the value quoted as a string literal
    Equals { field: String, value: String },
    /// A raw SQL-92 expression passed through as-is (after URL encoding)
    Expression(String),
}

impl AttributeFilter {
    /// Shorthand for an equality filter.
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        AttributeFilter::Equals {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Point-and-radius spatial filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialFilter {
    /// Search center, expressed in `in_sr`
    pub center: GeoPoint,
    /// Search radius in `units`
    pub radius: f64,
    pub units: DistanceUnit,
    /// Spatial reference of `center`
    pub in_sr: SpatialReference,
}

impl SpatialFilter {
    /// Creates a radius filter in meters around a WGS 84 point.
    pub fn meters_around(center: GeoPoint, radius: f64) -> Self {
        Self {
            center,
            radius,
            units: DistanceUnit::Meter,
            in_sr: SpatialReference::WGS84,
        }
    }
}

/// Everything needed to build one feature-service query.
///
/// Built fresh for each request. Output fields are kept in a sorted set so
/// the built query does not depend on insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParameters {
    pub output_format: OutputFormat,
    pub spatial_filter: Option<SpatialFilter>,
    pub attribute_filter: Option<AttributeFilter>,
    pub output_fields: BTreeSet<String>,
    pub out_sr: SpatialReference,
    pub result_limit: Option<u32>,
}

impl QueryParameters {
    /// Creates parameters returning GeoJSON in the given spatial reference,
    /// with no filter, no output fields and no result limit.
    pub fn new(out_sr: SpatialReference) -> Self {
        Self {
            output_format: OutputFormat::GeoJson,
            spatial_filter: None,
            attribute_filter: None,
            output_fields: BTreeSet::new(),
            out_sr,
            result_limit: None,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Replaces the output field set.
    pub fn with_output_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attribute_filter(mut self, filter: AttributeFilter) -> Self {
        self.attribute_filter = Some(filter);
        self
    }

    pub fn with_spatial_filter(mut self, filter: SpatialFilter) -> Self {
        self.spatial_filter = Some(filter);
        self
    }

    pub fn with_result_limit(mut self, limit: u32) -> Self {
        self.result_limit = Some(limit);
        self
    }
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self::new(SpatialReference::WGS84)
    }
}
