//! Coordinate type definitions

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Valid latitude range for geographic coordinates
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range for geographic coordinates
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A spatial reference identified by its well-known ID (WKID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SpatialReference(pub u32);

impl SpatialReference {
    /// WGS 84 geographic coordinates (degrees).
    pub const WGS84: SpatialReference = SpatialReference(4326);

    /// Web Mercator auxiliary sphere (meters).
    pub const WEB_MERCATOR: SpatialReference = SpatialReference(3857);

    /// The legacy Esri WKID for Web Mercator.
    pub const WEB_MERCATOR_ESRI: SpatialReference = SpatialReference(102100);

    /// Returns the numeric WKID.
    #[inline]
    pub fn wkid(&self) -> u32 {
        self.0
    }

    /// Whether coordinates in this reference are longitude/latitude degrees.
    #[inline]
    pub fn is_geographic(&self) -> bool {
        *self == Self::WGS84
    }
}

impl Default for SpatialReference {
    fn default() -> Self {
        Self::WGS84
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A two-dimensional point, x = longitude and y = latitude for geographic references.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    /// Creates a point without validation.
    #[inline]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Creates a geographic point, rejecting non-finite or out-of-range values.
    pub fn geographic(longitude: f64, latitude: f64) -> Result<Self, CoordError> {
        let point = Self::new(longitude, latitude);
        point.validate_geographic()?;
        Ok(point)
    }

    /// Checks that the point is a valid longitude/latitude pair.
    pub fn validate_geographic(&self) -> Result<(), CoordError> {
        if !self.latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&self.latitude) {
            return Err(CoordError::InvalidLatitude(self.latitude));
        }
        if !self.longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&self.longitude) {
            return Err(CoordError::InvalidLongitude(self.longitude));
        }
        Ok(())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

/// Errors that can occur when validating coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    #[error("Invalid latitude: {0} (must be between -90 and 90)")]
    InvalidLatitude(f64),
    #[error("Invalid longitude: {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),
    #[error("Invalid coordinate pair '{0}' (expected LON,LAT)")]
    Unparseable(String),
}
