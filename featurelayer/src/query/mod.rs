//! Feature-service query construction
//!
//! Turns a [`QueryParameters`] value into the query string understood by an
//! ArcGIS feature layer `query` endpoint. Attribute and spatial filtering are
//! mutually exclusive; asking for both is reported as a [`QueryError`] before
//! any request is made.
//!
//! # Example
//!
//! ```
//! use featurelayer::coord::SpatialReference;
//! use featurelayer::query::{AttributeFilter, QueryBuilder, QueryParameters};
//!
//! let params = QueryParameters::new(SpatialReference::WGS84)
//!     .with_output_fields(["gattung", "kronedurch", "baumhoehe"])
//!     .with_attribute_filter(AttributeFilter::equals("bezirk", "Mitte"))
//!     .with_result_limit(500);
//!
//! let query = QueryBuilder::new().build(&params).unwrap();
//! assert!(query.contains("where=bezirk%3D%27Mitte%27"));
//! ```

mod builder;
mod error;
mod params;

pub use builder::{validate_field_name, QueryBuilder, MATCH_ALL_WHERE};
pub use error::QueryError;
pub use params::{AttributeFilter, DistanceUnit, OutputFormat, QueryParameters, SpatialFilter};
