//! Pipeline error type.

use thiserror::Error;

use crate::feature::ParseError;
use crate::query::QueryError;
use crate::transport::TransportError;

/// Errors that abort a whole query.
///
/// Per-record mapping problems are not here; they are reported in
/// [`MappingReport::skipped`](crate::placement::MappingReport).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayerError {
    /// Invalid query parameters; no request was sent
    #[error("Configuration error: {0}")]
    Configuration(#[from] QueryError),

    /// The request failed or timed out
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response could not be read as a feature collection
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl LayerError {
    /// Whether retrying the same query could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LayerError::Transport(_))
    }
}
