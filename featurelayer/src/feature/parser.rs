//! GeoJSON feature collection parser.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::error::ParseError;
use super::record::FeatureRecord;
use crate::coord::GeoPoint;

const FEATURE_COLLECTION: &str = "FeatureCollection";

/// Top-level response body.
///
/// A feature layer answers either with a feature collection or, with HTTP
/// 200, an `error` envelope. Unknown members are ignored.
#[derive(Deserialize)]
struct ResponseBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    features: Option<Vec<Value>>,
    error: Option<ServiceErrorBody>,
}

/// ArcGIS error envelope: `{"error": {"code": 400, "message": "..."}}`.
#[derive(Deserialize)]
struct ServiceErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

/// One GeoJSON feature.
///
/// Decoded per element so failures can name the feature index.
#[derive(Deserialize)]
struct FeatureBody {
    geometry: Option<GeometryBody>,
    /// `None` when the key is missing, `Some(None)` when it is `null`
    #[serde(default, deserialize_with = "present")]
    properties: Option<Option<Map<String, Value>>>,
}

#[derive(Deserialize)]
struct GeometryBody {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<Map<String, Value>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Map<String, Value>>::deserialize(deserializer).map(Some)
}

/// Parses a GeoJSON feature collection into records, preserving payload order.
///
/// Unknown members and extra attributes are ignored. Coordinates beyond the
/// first two (elevation, measure) are dropped.
pub fn parse_feature_collection(payload: &str) -> Result<Vec<FeatureRecord>, ParseError> {
    if payload.trim().is_empty() {
        return Err(ParseError::MalformedPayload("empty payload".to_string()));
    }

    // Syntax errors are malformed payloads; shape errors are schema mismatches.
    let root: Value =
        serde_json::from_str(payload).map_err(|e| ParseError::MalformedPayload(e.to_string()))?;
    if !root.is_object() {
        return Err(ParseError::SchemaMismatch(
            "top-level value is not an object".to_string(),
        ));
    }

    let body = ResponseBody::deserialize(root)
        .map_err(|e| ParseError::SchemaMismatch(e.to_string()))?;

    if let Some(error) = body.error {
        return Err(ParseError::ServiceError {
            code: error.code.unwrap_or(0),
            message: error.message.unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    if let Some(kind) = body.kind.as_deref() {
        if kind != FEATURE_COLLECTION {
            return Err(ParseError::SchemaMismatch(format!(
                "expected type '{}', found '{}'",
                FEATURE_COLLECTION, kind
            )));
        }
    }

    let features = body
        .features
        .ok_or_else(|| ParseError::SchemaMismatch("missing 'features'".to_string()))?;

    let records = features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| parse_feature(index, feature))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(features = records.len(), "Parsed feature collection");
    Ok(records)
}

/// Parses a raw response body, rejecting bodies that are not UTF-8.
pub fn parse_feature_collection_bytes(payload: &[u8]) -> Result<Vec<FeatureRecord>, ParseError> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| ParseError::MalformedPayload(format!("payload is not UTF-8: {}", e)))?;
    parse_feature_collection(text)
}

fn parse_feature(index: usize, feature: Value) -> Result<FeatureRecord, ParseError> {
    let feature = FeatureBody::deserialize(feature)
        .map_err(|e| ParseError::SchemaMismatch(format!("feature {}: {}", index, e)))?;

    let geometry = feature.geometry.ok_or_else(|| {
        ParseError::SchemaMismatch(format!("feature {} has no 'geometry'", index))
    })?;
    let coordinates = geometry.coordinates.ok_or_else(|| {
        ParseError::SchemaMismatch(format!("feature {} has no 'geometry.coordinates'", index))
    })?;
    let coordinates = parse_position(index, &coordinates)?;

    let attributes = match feature.properties {
        Some(Some(properties)) => stringify_properties(&properties),
        Some(None) => BTreeMap::new(),
        None => {
            return Err(ParseError::SchemaMismatch(format!(
                "feature {} has no 'properties'",
                index
            )))
        }
    };

    trace!(
        index,
        geometry_type = %geometry.kind,
        x = coordinates.longitude,
        y = coordinates.latitude,
        "Parsed feature"
    );
    Ok(FeatureRecord::new(geometry.kind, coordinates, attributes))
}

fn parse_position(index: usize, coordinates: &Value) -> Result<GeoPoint, ParseError> {
    let components = coordinates.as_array().ok_or_else(|| ParseError::InvalidGeometry {
        index,
        reason: "'coordinates' is not an array".to_string(),
    })?;

    if components.len() < 2 {
        return Err(ParseError::InvalidGeometry {
            index,
            reason: format!("expected 2 coordinate components, found {}", components.len()),
        });
    }

    let component = |i: usize| -> Result<f64, ParseError> {
        components[i]
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidGeometry {
                index,
                reason: format!("coordinate component {} is not a number: {}", i, components[i]),
            })
    };

    Ok(GeoPoint::new(component(0)?, component(1)?))
}

/// Converts JSON properties into string attributes.
///
/// Strings are kept verbatim, numbers and booleans are stringified, nulls
/// count as absent, nested values are skipped.
fn stringify_properties(properties: &Map<String, Value>) -> BTreeMap<String, String> {
    properties
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key.clone(), value))
        })
        .collect()
}
