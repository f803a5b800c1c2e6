//! Transport errors.

use std::time::Duration;
use thiserror::Error;

/// Network or service failures. Callers may retry these; nothing here
/// retries automatically.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// The request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// No complete response arrived in time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}
