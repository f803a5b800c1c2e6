//! Placement errors.

use thiserror::Error;

/// Per-record mapping failures.
///
/// Batch mapping skips the offending record and reports it; see
/// [`super::MappingReport`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// A required attribute is absent from the record
    #[error("Missing attribute '{field}'")]
    MissingAttribute { field: String },

    /// A numeric attribute could not be read as a positive number
    #[error("Invalid numeric attribute '{field}' = '{value}'")]
    InvalidNumericAttribute { field: String, value: String },
}

/// Invalid mapping configuration, reported when the context is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementConfigError {
    /// A baseline axis length is zero, negative or not a number
    #[error("Reference {axis} must be a positive number, got {value}")]
    InvalidReference { axis: &'static str, value: f64 },

    /// The spawn height is not a finite number
    #[error("Spawn height must be a finite number, got {0}")]
    InvalidSpawnHeight(f64),

    /// An attribute schema field name is empty
    #[error("Attribute schema field for {0} is empty")]
    EmptySchemaField(&'static str),
}
