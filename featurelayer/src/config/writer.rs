//! INI serialization: `ConfigFile` → commented config.ini text.

use std::fmt::Write;
use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let query = &config.query;
    let placement = &config.placement;

    let mut out = format!(
        r#"[service]
; Feature layer URL, e.g.
; https://services2.arcgis.com/<org>/arcgis/rest/services/<name>/FeatureServer/0
url = {}
; Request timeout in seconds (default: 30)
timeout = {}

[query]
; Comma-separated attribute fields to request. Empty lets the service decide.
out_fields = {}
; Spatial reference (WKID) of returned geometry (default: 4326)
out_sr = {}
; Maximum number of features per query (default: 500, empty for no limit)
result_record_count = {}
; Attribute filter: where_field = where_value, e.g. bezirk = Mitte
where_field = {}
where_value = {}
; Raw where expression, used instead of where_field/where_value
where = {}
; Spatial filter: features within radius of (center_lon, center_lat).
; Cannot be combined with an attribute filter.
center_lon = {}
center_lat = {}
radius = {}
; Radius units: meter, kilometer, foot or mile (default: meter)
units = {}
; Spatial reference (WKID) of the center point (default: 4326)
in_sr = {}

[placement]
; Elevation given to every placed feature (default: 10000)
spawn_height = {}
; Crown diameter and height of the reference asset at scale 1 (default: 1.0)
reference_crown = {}
reference_height = {}
; Attribute names holding genus, crown diameter and height
genus_field = {}
crown_field = {}
height_field = {}
; Asset used for genera missing from [assets]. Empty leaves them unassigned.
default_asset = {}

[logging]
; Log directory (default: ~/.featurelayer/logs)
directory = {}
file = {}

[assets]
; One line per genus: GENUS = asset_key
"#,
        config.service.url.as_deref().unwrap_or(""),
        config.service.timeout,
        query.out_fields.join(","),
        query.out_sr,
        optional(query.result_record_count),
        query.where_field.as_deref().unwrap_or(""),
        query.where_value.as_deref().unwrap_or(""),
        query.where_clause.as_deref().unwrap_or(""),
        optional(query.center_lon),
        optional(query.center_lat),
        optional(query.radius),
        query.units,
        query.in_sr,
        placement.spawn_height,
        placement.reference_crown,
        placement.reference_height,
        placement.genus_field,
        placement.crown_field,
        placement.height_field,
        placement.default_asset.as_deref().unwrap_or(""),
        path_to_string(&config.logging.directory),
        config.logging.file,
    );

    for (genus, asset) in &config.assets.entries {
        let _ = writeln!(out, "{} = {}", genus, asset);
    }
    out
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Render a path with the home directory shortened to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
