//! Settings structs, one per `[section]` of config.ini.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::query::DistanceUnit;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Feature service endpoint
    pub service: ServiceSettings,
    /// Default query parameters
    pub query: QuerySettings,
    /// Placement mapping
    pub placement: PlacementSettings,
    /// Genus to asset catalog
    pub assets: AssetSettings,
    /// Log output
    pub logging: LoggingSettings,
}

/// Feature service settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    /// Feature layer URL, e.g. `https://.../FeatureServer/0`
    pub url: Option<String>,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Default query parameters.
///
/// The attribute and spatial filters are both optional and independent
/// here; choosing both is reported when the query is built.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySettings {
    /// Fields to request; empty lets the service decide
    pub out_fields: Vec<String>,
    /// WKID of returned geometry
    pub out_sr: u32,
    /// Maximum number of features; `None` for no limit
    pub result_record_count: Option<u32>,
    /// Equality filter field, paired with `where_value`
    pub where_field: Option<String>,
    pub where_value: Option<String>,
    /// Raw where expression, used when no equality filter is set
    pub where_clause: Option<String>,
    pub center_lon: Option<f64>,
    pub center_lat: Option<f64>,
    pub radius: Option<f64>,
    pub units: DistanceUnit,
    /// WKID of the search center
    pub in_sr: u32,
}

/// Placement mapping settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSettings {
    /// Elevation assigned to every placed feature
    pub spawn_height: f64,
    /// Crown diameter of the reference asset at scale 1
    pub reference_crown: f64,
    /// Height of the reference asset at scale 1
    pub reference_height: f64,
    pub genus_field: String,
    pub crown_field: String,
    pub height_field: String,
    /// Asset for unmapped genera; `None` leaves them unassigned
    pub default_asset: Option<String>,
}

/// `[assets]` section: one `GENUS = asset` line per entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetSettings {
    pub entries: BTreeMap<String, String>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory for the log file
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
}
