//! Response parsing errors.

use thiserror::Error;

/// Errors raised while turning a response payload into feature records.
///
/// Any of these aborts the whole payload: a collection with one broken
/// feature is not trusted partially.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The payload is not valid JSON
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The JSON is valid but lacks the keys a feature collection must have
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A feature's coordinates do not hold two numeric components
    #[error("Invalid geometry in feature {index}: {reason}")]
    InvalidGeometry { index: usize, reason: String },

    /// The service answered with an error envelope instead of features
    #[error("Feature service error {code}: {message}")]
    ServiceError { code: i64, message: String },
}
