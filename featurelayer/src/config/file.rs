//! Loading and saving ~/.featurelayer/config.ini, and turning the loaded
//! settings into library types.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::{Ini, ParseOption};
use thiserror::Error;

use super::settings::ConfigFile;
use crate::coord::{GeoPoint, SpatialReference};
use crate::placement::{
    AssetCatalog, AssetKey, AttributeSchema, MappingContext, MissingAssetPolicy,
    PlacementConfigError, ReferenceDimensions,
};
use crate::query::{AttributeFilter, QueryParameters, SpatialFilter};
use crate::selection::SelectionIndex;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Placement settings that parse but cannot be used
    #[error("Invalid placement configuration: {0}")]
    Placement(#[from] PlacementConfigError),

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFileError {
    pub(super) fn invalid(
        section: &str,
        key: &str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl ConfigFile {
    /// Load configuration from the default path (~/.featurelayer/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        // Values are written raw, so read them back raw: a leading quote or
        // a backslash in a where expression belongs to the expression.
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_file_opt(path, options)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        std::fs::write(path, self.to_ini_string())
            .map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// The commented INI text `save_to` would write.
    pub fn to_ini_string(&self) -> String {
        super::writer::to_config_string(self)
    }

    /// Create a default config file at `path` if it doesn't exist.
    ///
    /// Returns `true` when the file was created.
    pub fn ensure_exists_at(path: &Path) -> Result<bool, ConfigFileError> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }

    /// The configured feature layer URL.
    pub fn service_url(&self) -> Result<&str, ConfigFileError> {
        self.service
            .url
            .as_deref()
            .ok_or_else(|| {
                ConfigFileError::invalid("service", "url", "", "a feature layer URL is required")
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout)
    }

    /// Builds query parameters from the `[query]` section.
    ///
    /// Filters are copied as configured. Setting both an attribute and a
    /// spatial filter is not rejected here; the query builder reports it.
    pub fn to_query_parameters(&self) -> Result<QueryParameters, ConfigFileError> {
        let query = &self.query;
        let mut params = QueryParameters::new(SpatialReference(query.out_sr))
            .with_output_fields(query.out_fields.iter().cloned());

        if let Some(limit) = query.result_record_count {
            params = params.with_result_limit(limit);
        }
        if let Some(filter) = self.attribute_filter()? {
            params = params.with_attribute_filter(filter);
        }
        if let Some(filter) = self.spatial_filter()? {
            params = params.with_spatial_filter(filter);
        }
        Ok(params)
    }

    fn attribute_filter(&self) -> Result<Option<AttributeFilter>, ConfigFileError> {
        let query = &self.query;
        match (&query.where_field, &query.where_value, &query.where_clause) {
            (Some(_), _, Some(clause)) => Err(ConfigFileError::invalid(
                "query",
                "where",
                clause.as_str(),
                "cannot be combined with where_field",
            )),
            (Some(field), Some(value), None) => {
                Ok(Some(AttributeFilter::equals(field.as_str(), value.as_str())))
            }
            (Some(field), None, None) => Err(ConfigFileError::invalid(
                "query",
                "where_value",
                "",
                format!("required when where_field = {}", field),
            )),
            (None, Some(value), _) => Err(ConfigFileError::invalid(
                "query",
                "where_field",
                "",
                format!("required when where_value = {}", value),
            )),
            (None, None, clause) => Ok(clause.clone().map(AttributeFilter::Expression)),
        }
    }

    fn spatial_filter(&self) -> Result<Option<SpatialFilter>, ConfigFileError> {
        let query = &self.query;
        match (query.center_lon, query.center_lat, query.radius) {
            (Some(lon), Some(lat), Some(radius)) => Ok(Some(SpatialFilter {
                center: GeoPoint::new(lon, lat),
                radius,
                units: query.units,
                in_sr: SpatialReference(query.in_sr),
            })),
            (None, None, None) => Ok(None),
            (lon, lat, _) => {
                let missing = if lon.is_none() {
                    "center_lon"
                } else if lat.is_none() {
                    "center_lat"
                } else {
                    "radius"
                };
                Err(ConfigFileError::invalid(
                    "query",
                    missing,
                    "",
                    "center_lon, center_lat and radius must be set together",
                ))
            }
        }
    }

    /// Builds the genus catalog from `[assets]` and `placement.default_asset`.
    pub fn asset_catalog(&self) -> AssetCatalog {
        let policy = match &self.placement.default_asset {
            Some(key) => MissingAssetPolicy::UseDefault(AssetKey::new(key.as_str())),
            None => MissingAssetPolicy::LeaveUnassigned,
        };
        let mut catalog = AssetCatalog::new(policy);
        for (genus, asset) in &self.assets.entries {
            catalog.insert(genus, AssetKey::new(asset.as_str()));
        }
        catalog
    }

    /// Builds the mapping context from `[placement]` and `[assets]`.
    pub fn to_mapping_context(&self) -> Result<MappingContext, ConfigFileError> {
        let placement = &self.placement;
        let reference =
            ReferenceDimensions::new(placement.reference_crown, placement.reference_height)?;
        let schema = AttributeSchema::new(
            placement.genus_field.as_str(),
            placement.crown_field.as_str(),
            placement.height_field.as_str(),
        );
        let context = MappingContext::new(
            placement.spawn_height,
            SpatialReference(self.query.out_sr),
            reference,
        )?
        .with_schema(schema)?
        .with_catalog(self.asset_catalog());
        Ok(context)
    }

    /// Fields offered for selection: the configured output fields plus the
    /// attributes placement needs.
    pub fn known_fields(&self) -> BTreeSet<String> {
        let placement = &self.placement;
        self.query
            .out_fields
            .iter()
            .chain([
                &placement.genus_field,
                &placement.crown_field,
                &placement.height_field,
            ])
            .cloned()
            .collect()
    }

    pub fn selection_index(&self) -> SelectionIndex {
        SelectionIndex::new(self.known_fields())
    }
}

/// Get the path to the config directory (~/.featurelayer).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".featurelayer")
}

/// Get the path to the config file (~/.featurelayer/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
