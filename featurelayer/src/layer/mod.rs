//! Query → fetch → parse → map pipeline
//!
//! [`FeatureLayer`] ties the pieces together for one feature layer URL:
//!
//! 1. build the query URL (configuration errors stop here, before any I/O)
//! 2. GET it through an [`AsyncHttpClient`], bounded by a timeout
//! 3. parse the body into [`FeatureRecord`]s
//! 4. map records into [`PlacementDirective`](crate::placement::PlacementDirective)s
//! 5. optionally hand them to a [`SceneSink`]
//!
//! Dropping a returned future abandons the query; nothing from a partially
//! received response is ever exposed.

mod error;

pub use error::LayerError;

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::feature::{parse_feature_collection, FeatureRecord};
use crate::placement::{MappingReport, PlacementMapper, SkippedFeature};
use crate::query::{QueryBuilder, QueryParameters};
use crate::scene::{PlacedFeatures, SceneSink};
use crate::transport::{AsyncHttpClient, TransportError, DEFAULT_TIMEOUT};

/// Features handed to a scene sink, plus the records that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Population<H> {
    pub placed: PlacedFeatures<H>,
    pub skipped: Vec<SkippedFeature>,
}

/// A queryable feature layer.
pub struct FeatureLayer<C: AsyncHttpClient> {
    client: C,
    layer_url: String,
    timeout: Duration,
    builder: QueryBuilder,
}

impl<C: AsyncHttpClient> FeatureLayer<C> {
    /// Creates a layer client with the default 30 second timeout.
    ///
    /// `layer_url` is the layer endpoint, e.g.
    /// `https://services2.arcgis.com/.../FeatureServer/0`.
    pub fn new(client: C, layer_url: impl Into<String>) -> Self {
        Self {
            client,
            layer_url: layer_url.into(),
            timeout: DEFAULT_TIMEOUT,
            builder: QueryBuilder::new(),
        }
    }

    /// Sets the overall time allowed for one request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn layer_url(&self) -> &str {
        &self.layer_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The URL [`query`](Self::query) would request.
    pub fn query_url(&self, params: &QueryParameters) -> Result<String, LayerError> {
        Ok(self.builder.query_url(&self.layer_url, params)?)
    }

    /// Runs a query and parses the response.
    pub async fn query(&self, params: &QueryParameters) -> Result<Vec<FeatureRecord>, LayerError> {
        let url = self.query_url(params)?;
        debug!(url = %url, "Querying feature layer");

        let body = match tokio::time::timeout(self.timeout, self.client.get(&url)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(url = %url, timeout = ?self.timeout, "Feature layer query timed out");
                return Err(TransportError::Timeout(self.timeout).into());
            }
        };

        let records = parse_feature_collection(&body)?;
        info!(features = records.len(), "Feature layer query returned");
        Ok(records)
    }

    /// Runs a query and maps every returned feature.
    pub async fn fetch_placements(
        &self,
        params: &QueryParameters,
        mapper: &PlacementMapper,
    ) -> Result<MappingReport, LayerError> {
        warn_on_missing_fields(params, mapper);
        let records = self.query(params).await?;
        Ok(mapper.map_all(&records))
    }

    /// Runs a query, maps the features and instantiates them through `sink`.
    pub async fn populate<S>(
        &self,
        params: &QueryParameters,
        mapper: &PlacementMapper,
        sink: &mut S,
    ) -> Result<Population<S::Handle>, LayerError>
    where
        S: SceneSink,
    {
        let report = self.fetch_placements(params, mapper).await?;
        let mut placed = PlacedFeatures::new();
        placed.instantiate_all(sink, report.directives);
        Ok(Population {
            placed,
            skipped: report.skipped,
        })
    }
}

/// Logs when an explicit field list leaves out attributes the mapper needs.
fn warn_on_missing_fields(params: &QueryParameters, mapper: &PlacementMapper) {
    if params.output_fields.is_empty() {
        return;
    }
    for field in mapper.context().schema().required_fields() {
        if !params.output_fields.contains(field) {
            warn!(
                field,
                "Query does not request an attribute needed for placement; features will be skipped"
            );
        }
    }
}
