//! Query configuration errors.

use thiserror::Error;

use crate::coord::CoordError;

/// Conflicting or invalid query parameters.
///
/// These are reported before any request leaves the process and are never
/// worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Attribute and spatial filters were both configured
    #[error("Attribute filter and spatial filter are mutually exclusive")]
    ConflictingFilters,

    /// An output or filter field name contains characters the service rejects
    #[error("Invalid field name '{0}' (expected letters, digits and '_')")]
    InvalidFieldName(String),

    /// A raw where expression was empty
    #[error("Attribute filter expression is empty")]
    EmptyExpression,

    /// Spatial filter radius is zero, negative or not a number
    #[error("Invalid search radius {0} (must be a positive number)")]
    InvalidRadius(f64),

    /// Spatial filter center is outside the geographic range
    #[error("Invalid spatial filter center: {0}")]
    InvalidCenter(#[from] CoordError),

    /// A result limit of zero would never return features
    #[error("Result limit must be at least 1")]
    ZeroResultLimit,

    /// The feature layer URL is empty
    #[error("Feature layer URL is empty")]
    EmptyLayerUrl,
}
