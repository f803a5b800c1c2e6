//! INI parsing: `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::query::{validate_field_name, DistanceUnit};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [service] section
    if let Some(section) = ini.section(Some("service")) {
        if let Some(v) = section.get("url") {
            config.service.url = non_empty(v);
        }
        if let Some(v) = section.get("timeout") {
            config.service.timeout = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigFileError::invalid(
                        "service",
                        "timeout",
                        v,
                        "must be a positive integer (seconds)",
                    ))
                }
            };
        }
    }

    // [query] section
    if let Some(section) = ini.section(Some("query")) {
        parse_query_section(section, &mut config)?;
    }

    // [placement] section
    if let Some(section) = ini.section(Some("placement")) {
        parse_placement_section(section, &mut config)?;
    }

    // [assets] section
    if let Some(section) = ini.section(Some("assets")) {
        for (genus, asset) in section.iter() {
            let asset = asset.trim();
            if asset.is_empty() {
                return Err(ConfigFileError::invalid(
                    "assets",
                    genus,
                    asset,
                    "asset key must not be empty",
                ));
            }
            config
                .assets
                .entries
                .insert(genus.trim().to_uppercase(), asset.to_string());
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            if let Some(dir) = non_empty(v) {
                config.logging.directory = expand_tilde(&dir);
            }
        }
        if let Some(v) = section.get("file") {
            if let Some(file) = non_empty(v) {
                config.logging.file = file;
            }
        }
    }

    Ok(config)
}

fn parse_query_section(
    section: &Properties,
    config: &mut ConfigFile,
) -> Result<(), ConfigFileError> {
    let query = &mut config.query;

    if let Some(v) = section.get("out_fields") {
        query.out_fields = parse_field_list(v)?;
    }
    if let Some(v) = section.get("out_sr") {
        query.out_sr = parse_wkid("out_sr", v)?;
    }
    if let Some(v) = section.get("result_record_count") {
        query.result_record_count = match v.trim() {
            "" => None,
            trimmed => match trimmed.parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    return Err(ConfigFileError::invalid(
                        "query",
                        "result_record_count",
                        v,
                        "must be a positive integer, or empty for no limit",
                    ))
                }
            },
        };
    }
    if let Some(v) = section.get("where_field") {
        query.where_field = non_empty(v);
        if let Some(field) = &query.where_field {
            validate_field_name(field).map_err(|e| {
                ConfigFileError::invalid("query", "where_field", field.as_str(), e.to_string())
            })?;
        }
    }
    if let Some(v) = section.get("where_value") {
        query.where_value = non_empty(v);
    }
    if let Some(v) = section.get("where") {
        query.where_clause = non_empty(v);
    }
    if let Some(v) = section.get("center_lon") {
        query.center_lon = parse_optional_f64("query", "center_lon", v)?;
    }
    if let Some(v) = section.get("center_lat") {
        query.center_lat = parse_optional_f64("query", "center_lat", v)?;
    }
    if let Some(v) = section.get("radius") {
        query.radius = parse_optional_f64("query", "radius", v)?;
    }
    if let Some(v) = section.get("units") {
        query.units = DistanceUnit::from_str(v)
            .map_err(|reason| ConfigFileError::invalid("query", "units", v, reason))?;
    }
    if let Some(v) = section.get("in_sr") {
        query.in_sr = parse_wkid("in_sr", v)?;
    }
    Ok(())
}

fn parse_placement_section(
    section: &Properties,
    config: &mut ConfigFile,
) -> Result<(), ConfigFileError> {
    let placement = &mut config.placement;

    if let Some(v) = section.get("spawn_height") {
        placement.spawn_height = parse_f64("placement", "spawn_height", v)?;
    }
    if let Some(v) = section.get("reference_crown") {
        placement.reference_crown = parse_f64("placement", "reference_crown", v)?;
    }
    if let Some(v) = section.get("reference_height") {
        placement.reference_height = parse_f64("placement", "reference_height", v)?;
    }
    for (key, target) in [
        ("genus_field", &mut placement.genus_field),
        ("crown_field", &mut placement.crown_field),
        ("height_field", &mut placement.height_field),
    ] {
        if let Some(v) = section.get(key) {
            let v = v.trim();
            validate_field_name(v)
                .map_err(|e| ConfigFileError::invalid("placement", key, v, e.to_string()))?;
            *target = v.to_string();
        }
    }
    if let Some(v) = section.get("default_asset") {
        placement.default_asset = non_empty(v);
    }
    Ok(())
}

/// Parse a comma-separated field list, ignoring blanks.
fn parse_field_list(value: &str) -> Result<Vec<String>, ConfigFileError> {
    let mut fields = Vec::new();
    for field in value.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        validate_field_name(field).map_err(|e| {
            ConfigFileError::invalid("query", "out_fields", value, e.to_string())
        })?;
        fields.push(field.to_string());
    }
    Ok(fields)
}

fn parse_wkid(key: &str, value: &str) -> Result<u32, ConfigFileError> {
    match value.trim().parse::<u32>() {
        Ok(wkid) if wkid > 0 => Ok(wkid),
        _ => Err(ConfigFileError::invalid(
            "query",
            key,
            value,
            "must be a spatial reference WKID such as 4326 or 3857",
        )),
    }
}

fn parse_f64(section: &str, key: &str, value: &str) -> Result<f64, ConfigFileError> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ConfigFileError::invalid(section, key, value, "must be a number")),
    }
}

fn parse_optional_f64(
    section: &str,
    key: &str,
    value: &str,
) -> Result<Option<f64>, ConfigFileError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_f64(section, key, value).map(Some)
}

fn non_empty(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
