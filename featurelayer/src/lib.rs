//! featurelayer - Feature service queries turned into scene placements
//!
//! This library queries a remote feature layer (ArcGIS-style REST endpoint
//! returning GeoJSON), parses the returned point features and maps each one
//! onto a placement directive: where to put a visual asset, how large to make
//! it, and which asset to use.
//!
//! # Pipeline
//!
//! ```ignore
//! use featurelayer::config::ConfigFile;
//! use featurelayer::layer::FeatureLayer;
//! use featurelayer::placement::PlacementMapper;
//! use featurelayer::transport::AsyncReqwestClient;
//!
//! let config = ConfigFile::load()?;
//! let client = AsyncReqwestClient::with_timeout(config.timeout())?;
//! let layer = FeatureLayer::new(client, config.service_url()?);
//! let mapper = PlacementMapper::new(config.to_mapping_context()?);
//!
//! let report = layer
//!     .fetch_placements(&config.to_query_parameters()?, &mapper)
//!     .await?;
//! ```
//!
//! The pieces can also be used on their own: [`query::QueryBuilder`] only
//! builds query strings, [`feature::parse_feature_collection`] only parses,
//! and [`placement::PlacementMapper`] only maps records already in memory.

pub mod config;
pub mod coord;
pub mod feature;
pub mod layer;
pub mod logging;
pub mod placement;
pub mod query;
pub mod scene;
pub mod selection;
pub mod transport;

/// Version of the featurelayer library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
