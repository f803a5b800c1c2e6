//! Attribute-driven placement
//!
//! Converts [`FeatureRecord`](crate::feature::FeatureRecord)s into
//! [`PlacementDirective`]s: the feature's position at the configured spawn
//! height, per-axis scale from its crown diameter and height, and a visual
//! asset chosen by genus.
//!
//! Unmapped genera are not an error. The catalog's [`MissingAssetPolicy`]
//! decides, and the directive records the outcome in [`AssetChoice`].

mod catalog;
mod context;
mod directive;
mod error;
mod mapper;

pub use catalog::{AssetCatalog, AssetChoice, AssetKey, MissingAssetPolicy};
pub use context::{AttributeSchema, MappingContext, ReferenceDimensions};
pub use directive::{PlacementDirective, Position, Scale};
pub use error::{MapError, PlacementConfigError};
pub use mapper::{map_record, MappingReport, PlacementMapper, SkippedFeature};

/// Asset used for unmapped genera when nothing else is configured.
pub const DEFAULT_ASSET_KEY: &str = "default_tree";
