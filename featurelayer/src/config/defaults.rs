//! Default values for every configuration setting.

use std::collections::BTreeMap;

use super::settings::*;
use crate::coord::SpatialReference;
use crate::logging::{default_log_dir, default_log_file};
use crate::placement::DEFAULT_ASSET_KEY;
use crate::query::DistanceUnit;

/// Default request timeout in seconds.
pub const DEFAULT_SERVICE_TIMEOUT_SECS: u64 = 30;

/// Default page size requested from the service.
pub const DEFAULT_RESULT_RECORD_COUNT: u32 = 500;

/// Default elevation for placed features.
pub const DEFAULT_SPAWN_HEIGHT: f64 = 10_000.0;

/// Default baseline axis length of the reference asset.
pub const DEFAULT_REFERENCE_SIZE: f64 = 1.0;

pub const DEFAULT_GENUS_FIELD: &str = "gattung";
pub const DEFAULT_CROWN_FIELD: &str = "kronedurch";
pub const DEFAULT_HEIGHT_FIELD: &str = "baumhoehe";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "featurelayer.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            service: ServiceSettings {
                url: None,
                timeout: DEFAULT_SERVICE_TIMEOUT_SECS,
            },
            query: QuerySettings {
                out_fields: vec![
                    DEFAULT_GENUS_FIELD.to_string(),
                    DEFAULT_CROWN_FIELD.to_string(),
                    DEFAULT_HEIGHT_FIELD.to_string(),
                ],
                out_sr: SpatialReference::WGS84.wkid(),
                result_record_count: Some(DEFAULT_RESULT_RECORD_COUNT),
                where_field: None,
                where_value: None,
                where_clause: None,
                center_lon: None,
                center_lat: None,
                radius: None,
                units: DistanceUnit::Meter,
                in_sr: SpatialReference::WGS84.wkid(),
            },
            placement: PlacementSettings {
                spawn_height: DEFAULT_SPAWN_HEIGHT,
                reference_crown: DEFAULT_REFERENCE_SIZE,
                reference_height: DEFAULT_REFERENCE_SIZE,
                genus_field: DEFAULT_GENUS_FIELD.to_string(),
                crown_field: DEFAULT_CROWN_FIELD.to_string(),
                height_field: DEFAULT_HEIGHT_FIELD.to_string(),
                default_asset: Some(DEFAULT_ASSET_KEY.to_string()),
            },
            assets: AssetSettings {
                entries: BTreeMap::new(),
            },
            logging: LoggingSettings {
                directory: default_log_dir(),
                file: default_log_file().to_string(),
            },
        }
    }
}
