//! Integration tests for the query → parse → map → instantiate pipeline.
//!
//! These tests drive [`FeatureLayer`] end to end against an in-memory
//! service, covering:
//! - Placement of a single Berlin street tree
//! - Order and count preservation across a batch
//! - Rejection of conflicting filters before any request
//! - Field selection feeding the query
//! - Skipping of records that cannot be placed

use std::sync::{Arc, Mutex};

use featurelayer::coord::{GeoPoint, SpatialReference};
use featurelayer::layer::{FeatureLayer, LayerError};
use featurelayer::placement::{
    AssetCatalog, AssetChoice, AssetKey, MapError, MappingContext, MissingAssetPolicy,
    PlacementDirective, PlacementMapper, ReferenceDimensions,
};
use featurelayer::query::{AttributeFilter, QueryError, QueryParameters, SpatialFilter};
use featurelayer::scene::SceneSink;
use featurelayer::selection::{SelectionIndex, SELECT_ALL_ENTRY};
use featurelayer::transport::{AsyncHttpClient, TransportError};

// =============================================================================
// Test Helpers
// =============================================================================

const LAYER_URL: &str = concat!(
    "https://services2.arcgis.com/jUpNdisbWqRpMo35/arcgis/rest/services/",
    "Baumkataster_Berlin/FeatureServer/0"
);

/// Serves one canned body and records every requested URL.
#[derive(Clone)]
struct FakeService {
    body: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeService {
    fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl AsyncHttpClient for FakeService {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(self.body.clone())
    }
}

/// Scene sink that numbers instantiated directives.
#[derive(Default)]
struct CountingScene {
    received: Vec<PlacementDirective>,
}

impl SceneSink for CountingScene {
    type Handle = usize;

    fn instantiate(&mut self, directive: PlacementDirective) -> usize {
        self.received.push(directive);
        self.received.len() - 1
    }
}

fn tree(lon: f64, lat: f64, properties: &str) -> String {
    format!(
        r#"{{"type":"Feature",
        "geometry":{{"type":"Point","coordinates":[{},{}]}},"properties":{}}}"#,
        lon,
        lat,
        properties
    )
}

fn collection(features: &[String]) -> String {
    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    )
}

fn mapper(catalog: AssetCatalog) -> PlacementMapper {
    let context = MappingContext::new(
        10_000.0,
        SpatialReference::WGS84,
        ReferenceDimensions::new(1.0, 1.0).unwrap(),
    )
    .unwrap()
    .with_catalog(catalog);
    PlacementMapper::new(context)
}

fn district_query() -> QueryParameters {
    QueryParameters::new(SpatialReference::WGS84)
        .with_output_fields(["gattung", "kronedurch", "baumhoehe"])
        .with_attribute_filter(AttributeFilter::equals("bezirk", "Mitte"))
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_single_tree_is_placed_at_spawn_height() {
    let body = collection(&[tree(
        13.3501,
        52.5145,
        r#"{"gattung":"ACER","kronedurch":"5.0","baumhoehe":"10.0"}"#,
    )]);
    let layer = FeatureLayer::new(FakeService::new(body), LAYER_URL);
    let catalog = AssetCatalog::default().with_entry("ACER", "maple_tree");

    let report = layer
        .fetch_placements(&district_query(), &mapper(catalog))
        .await
        .unwrap();

    assert!(report.is_complete());
    let directive = &report.directives[0];
    let position = directive.position();
    assert_eq!(
        (position.longitude, position.latitude, position.elevation),
        (13.3501, 52.5145, 10_000.0)
    );
    let scale = directive.scale();
    assert_eq!((scale.x, scale.y, scale.z), (5.0, 10.0, 5.0));
    assert_eq!(
        directive.asset(),
        &AssetChoice::Catalog(AssetKey::new("maple_tree"))
    );
    assert_eq!(directive.attributes().get("gattung").map(String::as_str), Some("ACER"));
}

#[tokio::test]
async fn test_batch_preserves_order_and_names() {
    let body = collection(&[
        tree(13.40, 52.52, r#"{"gattung":"TILIA","kronedurch":4,"baumhoehe":12}"#),
        tree(13.41, 52.53, r#"{"gattung":"ACER","kronedurch":"3.5","baumhoehe":"8"}"#),
        tree(13.42, 52.54, r#"{"gattung":"PLATANUS","kronedurch":"9","baumhoehe":"20"}"#),
    ]);
    let service = FakeService::new(body);
    let layer = FeatureLayer::new(service.clone(), LAYER_URL);
    let mut scene = CountingScene::default();

    let population = layer
        .populate(&district_query(), &mapper(AssetCatalog::default()), &mut scene)
        .await
        .unwrap();

    assert!(population.skipped.is_empty());
    assert_eq!(population.placed.len(), 3);
    assert_eq!(scene.received.len(), 3);

    let longitudes: Vec<f64> = scene
        .received
        .iter()
        .map(|d| d.position().longitude)
        .collect();
    assert_eq!(longitudes, vec![13.40, 13.41, 13.42]);
    assert_eq!(
        population.placed.sorted_names(),
        vec!["ACER_1", "PLATANUS_2", "TILIA_0"]
    );
    assert_eq!(population.placed.find("ACER_1").map(|f| f.handle), Some(1));

    // Unmapped genera fell back to the default asset
    assert!(scene.received.iter().all(|d| d.asset().is_fallback()));
    assert_eq!(service.requests().len(), 1);
}

#[tokio::test]
async fn test_conflicting_filters_rejected_before_transport() {
    let service = FakeService::new(collection(&[]));
    let layer = FeatureLayer::new(service.clone(), LAYER_URL);
    let params = district_query().with_spatial_filter(SpatialFilter::meters_around(
        GeoPoint::new(13.3501, 52.5145),
        1000.0,
    ));

    let result = layer
        .fetch_placements(&params, &mapper(AssetCatalog::default()))
        .await;

    assert_eq!(
        result.unwrap_err(),
        LayerError::Configuration(QueryError::ConflictingFilters)
    );
    assert!(service.requests().is_empty());
}

#[tokio::test]
async fn test_select_all_requests_every_known_field() {
    let service = FakeService::new(collection(&[]));
    let layer = FeatureLayer::new(service.clone(), LAYER_URL);

    let mut selection = SelectionIndex::new(["gattung", "art_dtsch", "baumhoehe", "kronedurch"]);
    selection.toggle(SELECT_ALL_ENTRY);
    assert!(selection.select_all_flag());

    let params = QueryParameters::new(SpatialReference::WGS84)
        .with_output_fields(selection.effective_field_set())
        .with_spatial_filter(SpatialFilter::meters_around(
            GeoPoint::new(13.3501, 52.5145),
            1000.0,
        ));
    let records = layer.query(&params).await.unwrap();

    assert!(records.is_empty());
    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].contains("outFields=art_dtsch,baumhoehe,gattung,kronedurch"));
    assert!(requests[0].contains("geometry=13.3501,52.5145"));
    assert!(requests[0].contains("distance=1000"));

    // A single field toggle afterwards leaves "all" mode
    selection.toggle("gattung");
    assert!(!selection.select_all_flag());
    assert_eq!(selection.effective_field_set().len(), 1);
}

#[tokio::test]
async fn test_unplaceable_records_are_skipped() {
    let body = collection(&[
        tree(13.40, 52.52, r#"{"gattung":"ACER","kronedurch":"5","baumhoehe":"10"}"#),
        tree(13.41, 52.53, r#"{"kronedurch":"5","baumhoehe":"10"}"#),
        tree(13.42, 52.54, r#"{"gattung":"TILIA","kronedurch":"n/a","baumhoehe":"10"}"#),
        tree(13.43, 52.55, r#"{"gattung":"QUERCUS","kronedurch":"6","baumhoehe":"18"}"#),
    ]);
    let layer = FeatureLayer::new(FakeService::new(body), LAYER_URL);
    let catalog = AssetCatalog::new(MissingAssetPolicy::LeaveUnassigned);

    let report = layer
        .fetch_placements(&district_query(), &mapper(catalog))
        .await
        .unwrap();

    assert_eq!(report.total(), 4);
    assert_eq!(report.directives.len(), 2);
    assert_eq!(report.directives[0].display_name(), "ACER_0");
    assert_eq!(report.directives[1].display_name(), "QUERCUS_1");
    assert_eq!(report.directives[1].asset(), &AssetChoice::Unassigned);

    let skipped: Vec<usize> = report.skipped.iter().map(|s| s.index).collect();
    assert_eq!(skipped, vec![1, 2]);
    assert!(matches!(
        report.skipped[0].error,
        MapError::MissingAttribute { .. }
    ));
    assert!(matches!(
        report.skipped[1].error,
        MapError::InvalidNumericAttribute { .. }
    ));
}

#[tokio::test]
async fn test_service_error_envelope_aborts_query() {
    let body = r#"{"error":{"code":400,"message":"Invalid or missing input parameters."}}"#;
    let layer = FeatureLayer::new(FakeService::new(body), LAYER_URL);

    let err = layer.query(&district_query()).await.unwrap_err();

    assert!(matches!(err, LayerError::Parse(_)));
    assert!(err.to_string().contains("Invalid or missing input parameters"));
}
