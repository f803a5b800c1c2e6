//! Placement directives handed to the scene side.

use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::AssetChoice;
use crate::coord::SpatialReference;

/// Where to put a feature: x/y from the feature, elevation from the context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
    pub elevation: f64,
    pub spatial_reference: SpatialReference,
}

/// Per-axis scale factors; y is the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A resolved instruction for representing one feature.
///
/// Directives are read-only; the scene side takes ownership of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementDirective {
    position: Position,
    scale: Scale,
    display_name: String,
    asset: AssetChoice,
    attributes: BTreeMap<String, String>,
}

impl PlacementDirective {
    pub(super) fn new(
        position: Position,
        scale: Scale,
        display_name: String,
        asset: AssetChoice,
        attributes: BTreeMap<String, String>,
    ) -> Self {
        Self {
            position,
            scale,
            display_name,
            asset,
            attributes,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The asset lookup outcome, including whether a fallback was applied.
    pub fn asset(&self) -> &AssetChoice {
        &self.asset
    }

    /// The source feature's attributes, for information panels.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}
