//! HTTP transport for feature-service queries
//!
//! The pipeline only needs "GET this URL, give me the body". The
//! [`AsyncHttpClient`] trait captures that so tests can run without a network.

mod error;
mod http;

pub use error::TransportError;
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT};

#[cfg(test)]
pub use http::tests::MockHttpClient;
