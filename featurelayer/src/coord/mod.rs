//! Geographic coordinates and spatial references
//!
//! Feature services answer in whatever spatial reference the query asks for
//! (`outSR`). Only WGS 84 coordinates carry range checks; projected references
//! are passed through untouched.

mod types;

pub use types::{CoordError, GeoPoint, SpatialReference, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Parses a `LON,LAT` pair as typed on the command line or stored in config.
///
/// The result is validated as a geographic point.
pub fn parse_lon_lat(input: &str) -> Result<GeoPoint, CoordError> {
    let (lon, lat) = input
        .split_once(',')
        .ok_or_else(|| CoordError::Unparseable(input.to_string()))?;

    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| CoordError::Unparseable(input.to_string()))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| CoordError::Unparseable(input.to_string()))?;

    GeoPoint::geographic(lon, lat)
}
