//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (init, path, show)
//! - [`fetch`] - Query the feature service and print placements
//! - [`parse`] - Map a saved GeoJSON response offline
//! - [`query`] - Print the query URL without sending it

pub mod common;
pub mod config;
pub mod fetch;
pub mod parse;
pub mod query;
