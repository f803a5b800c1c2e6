//! Feature-service response parsing
//!
//! A query answered with `f=geojson` returns a feature collection. This module
//! reads it into [`FeatureRecord`]s: one per feature, in payload order, each
//! with a point position and a flat map of string attributes.

mod error;
mod parser;
mod record;

pub use error::ParseError;
pub use parser::{parse_feature_collection, parse_feature_collection_bytes};
pub use record::FeatureRecord;
