//! Mapping configuration.

use super::catalog::AssetCatalog;
use super::error::PlacementConfigError;
use crate::coord::SpatialReference;

/// Names of the attributes that drive placement.
///
/// Defaults match the Berlin tree cadastre (`Baumkataster_Berlin`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    /// Category used for asset lookup and display names
    pub genus: String,
    /// Crown diameter, scales the horizontal axes
    pub crown: String,
    /// Height, scales the vertical axis
    pub height: String,
}

impl AttributeSchema {
    pub fn new(
        genus: impl Into<String>,
        crown: impl Into<String>,
        height: impl Into<String>,
    ) -> Self {
        Self {
            genus: genus.into(),
            crown: crown.into(),
            height: height.into(),
        }
    }

    /// The fields a query must request for mapping to succeed.
    pub fn required_fields(&self) -> [&str; 3] {
        [&self.genus, &self.crown, &self.height]
    }

    fn validate(&self) -> Result<(), PlacementConfigError> {
        if self.genus.trim().is_empty() {
            return Err(PlacementConfigError::EmptySchemaField("genus"));
        }
        if self.crown.trim().is_empty() {
            return Err(PlacementConfigError::EmptySchemaField("crown"));
        }
        if self.height.trim().is_empty() {
            return Err(PlacementConfigError::EmptySchemaField("height"));
        }
        Ok(())
    }
}

impl Default for AttributeSchema {
    fn default() -> Self {
        Self::new("gattung", "kronedurch", "baumhoehe")
    }
}

/// Baseline axis lengths of the default visual asset.
///
/// A feature's scale on an axis is its attribute value divided by the
/// matching baseline, so a baseline of 1.0 means "attribute is the size".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceDimensions {
    crown_diameter: f64,
    height: f64,
}

impl ReferenceDimensions {
    /// Rejects zero, negative and non-finite baselines.
    pub fn new(crown_diameter: f64, height: f64) -> Result<Self, PlacementConfigError> {
        if !crown_diameter.is_finite() || crown_diameter <= 0.0 {
            return Err(PlacementConfigError::InvalidReference {
                axis: "crown diameter",
                value: crown_diameter,
            });
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(PlacementConfigError::InvalidReference {
                axis: "height",
                value: height,
            });
        }
        Ok(Self {
            crown_diameter,
            height,
        })
    }

    pub fn crown_diameter(&self) -> f64 {
        self.crown_diameter
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for ReferenceDimensions {
    fn default() -> Self {
        Self {
            crown_diameter: 1.0,
            height: 1.0,
        }
    }
}

/// Everything the mapper needs besides the record itself.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingContext {
    spawn_height: f64,
    spatial_reference: SpatialReference,
    reference: ReferenceDimensions,
    schema: AttributeSchema,
    catalog: AssetCatalog,
}

impl MappingContext {
    /// Creates a context with the default schema and catalog.
    ///
    /// `spatial_reference` must match the `outSR` the features were queried in.
    pub fn new(
        spawn_height: f64,
        spatial_reference: SpatialReference,
        reference: ReferenceDimensions,
    ) -> Result<Self, PlacementConfigError> {
        if !spawn_height.is_finite() {
            return Err(PlacementConfigError::InvalidSpawnHeight(spawn_height));
        }
        Ok(Self {
            spawn_height,
            spatial_reference,
            reference,
            schema: AttributeSchema::default(),
            catalog: AssetCatalog::default(),
        })
    }

    pub fn with_schema(mut self, schema: AttributeSchema) -> Result<Self, PlacementConfigError> {
        schema.validate()?;
        self.schema = schema;
        Ok(self)
    }

    pub fn with_catalog(mut self, catalog: AssetCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn spawn_height(&self) -> f64 {
        self.spawn_height
    }

    pub fn spatial_reference(&self) -> SpatialReference {
        self.spatial_reference
    }

    pub fn reference(&self) -> &ReferenceDimensions {
        &self.reference
    }

    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }
}
