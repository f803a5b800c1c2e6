//! Common arguments and output shared across CLI commands.

use std::collections::BTreeSet;

use clap::Args;
use featurelayer::config::ConfigFile;
use featurelayer::coord::{parse_lon_lat, GeoPoint};
use featurelayer::placement::{PlacementDirective, SkippedFeature};
use featurelayer::query::{DistanceUnit, QueryParameters};
use featurelayer::scene::{PlacedFeatures, SceneSink};
use featurelayer::selection::{SelectionIndex, SELECT_ALL_ENTRY};

use crate::error::CliError;

/// Query filter and field arguments.
///
/// Any filter given here replaces the filters from config.ini; the other
/// `[query]` settings still apply.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Attribute to match, paired with --where-value (e.g. bezirk)
    #[arg(long, requires = "where_value", conflicts_with = "where_clause")]
    pub where_field: Option<String>,

    /// Value the --where-field attribute must equal (e.g. Mitte)
    #[arg(long, requires = "where_field")]
    pub where_value: Option<String>,

    /// Raw where expression (e.g. "baumhoehe > 20")
    #[arg(long = "where", value_name = "EXPR")]
    pub where_clause: Option<String>,

    /// Search center for a distance query
    #[arg(
        long,
        value_name = "LON,LAT",
        value_parser = parse_lon_lat,
        allow_hyphen_values = true,
        requires = "radius"
    )]
    pub near: Option<GeoPoint>,

    /// Search radius around --near
    #[arg(long, requires = "near")]
    pub radius: Option<f64>,

    /// Radius units: meter, kilometer, foot or mile
    #[arg(long, value_parser = parse_units)]
    pub units: Option<DistanceUnit>,

    /// Fields to request, comma separated
    #[arg(long, value_delimiter = ',', conflicts_with = "all_fields")]
    pub fields: Vec<String>,

    /// Request every known field
    #[arg(long)]
    pub all_fields: bool,

    /// Maximum number of features to return
    #[arg(long)]
    pub limit: Option<u32>,
}

fn parse_units(value: &str) -> Result<DistanceUnit, String> {
    value.parse()
}

impl FilterArgs {
    fn has_filter(&self) -> bool {
        self.where_field.is_some() || self.where_clause.is_some() || self.near.is_some()
    }

    /// Fields picked on the command line, resolved against the known fields.
    fn selected_fields(&self, config: &ConfigFile) -> Option<BTreeSet<String>> {
        let mut known = config.known_fields();
        if self.all_fields {
            let mut selection = SelectionIndex::new(known);
            selection.toggle(SELECT_ALL_ENTRY);
            return Some(selection.effective_field_set());
        }
        if self.fields.is_empty() {
            return None;
        }

        let requested: BTreeSet<&str> = self.fields.iter().map(|f| f.trim()).collect();
        known.extend(requested.iter().map(|f| f.to_string()));
        let mut selection = SelectionIndex::new(known);
        for field in requested {
            selection.toggle(field);
        }
        Some(selection.effective_field_set())
    }

    /// Overlays these arguments on the `[query]` settings.
    pub fn to_query_parameters(&self, config: &ConfigFile) -> Result<QueryParameters, CliError> {
        let mut config = config.clone();
        let query = &mut config.query;

        if self.has_filter() {
            query.where_field = None;
            query.where_value = None;
            query.where_clause = None;
            query.center_lon = None;
            query.center_lat = None;
            query.radius = None;
        }
        if let Some(field) = &self.where_field {
            query.where_field = Some(field.clone());
            query.where_value = self.where_value.clone();
        }
        if let Some(clause) = &self.where_clause {
            query.where_clause = Some(clause.clone());
        }
        if let Some(center) = self.near {
            query.center_lon = Some(center.longitude);
            query.center_lat = Some(center.latitude);
            query.radius = self.radius;
        }
        if let Some(units) = self.units {
            query.units = units;
        }
        if let Some(limit) = self.limit {
            query.result_record_count = Some(limit);
        }
        if let Some(fields) = self.selected_fields(&config) {
            config.query.out_fields = fields.into_iter().collect();
        }

        Ok(config.to_query_parameters()?)
    }
}

/// Output arguments for commands that print placements.
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Print placements as JSON
    #[arg(long)]
    pub json: bool,

    /// Print only the feature with this display name (e.g. ACER_0)
    #[arg(long, value_name = "NAME")]
    pub find: Option<String>,
}

/// Scene sink that keeps directives for printing.
///
/// Handles are indices into `directives`.
#[derive(Debug, Default)]
pub struct OutputScene {
    pub directives: Vec<PlacementDirective>,
}

impl SceneSink for OutputScene {
    type Handle = usize;

    fn instantiate(&mut self, directive: PlacementDirective) -> usize {
        self.directives.push(directive);
        self.directives.len() - 1
    }
}

/// Prints placed features as a table or JSON.
pub fn print_placements(
    scene: &OutputScene,
    placed: &PlacedFeatures<usize>,
    skipped: &[SkippedFeature],
    output: &OutputArgs,
) -> Result<(), CliError> {
    if let Some(name) = &output.find {
        let directive = find_directive(scene, placed, name)?;
        if output.json {
            println!("{}", serde_json::to_string_pretty(directive)?);
        } else {
            print_table(std::slice::from_ref(directive));
        }
        return Ok(());
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(&scene.directives)?);
    } else {
        print_table(&scene.directives);
        println!();
        println!("{} placed, {} skipped", placed.len(), skipped.len());
    }

    for skip in skipped {
        eprintln!("  skipped feature #{}: {}", skip.index, skip.error);
    }
    Ok(())
}

/// Looks up a placed feature by display name.
fn find_directive<'a>(
    scene: &'a OutputScene,
    placed: &PlacedFeatures<usize>,
    name: &str,
) -> Result<&'a PlacementDirective, CliError> {
    placed
        .find(name)
        .and_then(|feature| scene.directives.get(feature.handle))
        .ok_or_else(|| {
            CliError::Config(format!(
                "No feature named '{}'. Placed features: {}",
                name,
                placed.sorted_names().join(", ")
            ))
        })
}

fn print_table(directives: &[PlacementDirective]) {
    println!(
        "{:<20} {:>12} {:>12} {:>10}  {:<20} {}",
        "NAME", "LONGITUDE", "LATITUDE", "ELEVATION", "SCALE X/Y/Z", "ASSET"
    );
    for directive in directives {
        let position = directive.position();
        let scale = directive.scale();
        let asset = match directive.asset().key() {
            Some(key) if directive.asset().is_fallback() => format!("{} (fallback)", key),
            Some(key) => key.to_string(),
            None => "-".to_string(),
        };
        println!(
            "{:<20} {:>12.6} {:>12.6} {:>10.1}  {:<20} {}",
            directive.display_name(),
            position.longitude,
            position.latitude,
            position.elevation,
            format!("{:.2}/{:.2}/{:.2}", scale.x, scale.y, scale.z),
            asset
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use featurelayer::query::AttributeFilter;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        filters: FilterArgs,
    }

    fn parse(args: &[&str]) -> FilterArgs {
        let mut argv = vec!["test"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().filters
    }

    #[test]
    fn test_equality_filter_replaces_config_filters() {
        let mut config = ConfigFile::default();
        config.query.center_lon = Some(13.35);
        config.query.center_lat = Some(52.51);
        config.query.radius = Some(1000.0);

        let params = parse(&["--where-field", "bezirk", "--where-value", "Mitte"])
            .to_query_parameters(&config)
            .unwrap();

        assert_eq!(
            params.attribute_filter,
            Some(AttributeFilter::equals("bezirk", "Mitte"))
        );
        assert!(params.spatial_filter.is_none());
    }

    #[test]
    fn test_near_with_negative_longitude() {
        let params = parse(&["--near", "-73.9857,40.7484", "--radius", "2", "--units", "km"])
            .to_query_parameters(&ConfigFile::default())
            .unwrap();

        let filter = params.spatial_filter.unwrap();
        assert_eq!(filter.center, GeoPoint::new(-73.9857, 40.7484));
        assert_eq!(filter.radius, 2.0);
        assert_eq!(filter.units, DistanceUnit::Kilometer);
    }

    #[test]
    fn test_near_requires_radius() {
        assert!(TestCli::try_parse_from(["test", "--near", "13.35,52.51"]).is_err());
    }

    #[test]
    fn test_where_value_requires_field() {
        assert!(TestCli::try_parse_from(["test", "--where-value", "Mitte"]).is_err());
    }

    #[test]
    fn test_both_filter_kinds_pass_through() {
        // Rejected later by the query builder
        let args = ["--where", "baumhoehe > 20", "--near", "13.35,52.51", "--radius", "500"];
        let params = parse(&args)
            .to_query_parameters(&ConfigFile::default())
            .unwrap();

        assert!(params.attribute_filter.is_some());
        assert!(params.spatial_filter.is_some());
    }

    #[test]
    fn test_explicit_fields() {
        let params = parse(&["--fields", "gattung,art_dtsch,gattung"])
            .to_query_parameters(&ConfigFile::default())
            .unwrap();

        let fields: Vec<&str> = params.output_fields.iter().map(String::as_str).collect();
        assert_eq!(fields, vec!["art_dtsch", "gattung"]);
    }

    #[test]
    fn test_all_fields_uses_known_fields() {
        let mut config = ConfigFile::default();
        config.query.out_fields = vec!["art_dtsch".to_string()];

        let params = parse(&["--all-fields"]).to_query_parameters(&config).unwrap();

        assert_eq!(params.output_fields, config.known_fields());
    }

    #[test]
    fn test_limit_overrides_config() {
        let params = parse(&["--limit", "25"])
            .to_query_parameters(&ConfigFile::default())
            .unwrap();
        assert_eq!(params.result_limit, Some(25));
    }

    const TREES: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","geometry":{"type":"Point","coordinates":[13.35,52.51]},
         "properties":{"gattung":"TILIA","kronedurch":"4","baumhoehe":"12"}},
        {"type":"Feature","geometry":{"type":"Point","coordinates":[13.36,52.52]},
         "properties":{"gattung":"ACER","kronedurch":"5","baumhoehe":"10"}}
    ]}"#;

    fn placed_trees() -> (OutputScene, PlacedFeatures<usize>) {
        let records = featurelayer::feature::parse_feature_collection(TREES).unwrap();
        let context = ConfigFile::default().to_mapping_context().unwrap();
        let report = featurelayer::placement::PlacementMapper::new(context).map_all(&records);

        let mut scene = OutputScene::default();
        let mut placed = PlacedFeatures::new();
        placed.instantiate_all(&mut scene, report.directives);
        (scene, placed)
    }

    #[test]
    fn test_output_scene_handles_are_indices() {
        let (scene, placed) = placed_trees();

        assert_eq!(scene.directives.len(), 2);
        for feature in placed.iter() {
            assert_eq!(
                scene.directives[feature.handle].display_name(),
                feature.display_name
            );
        }
        let handles: Vec<usize> = placed.iter().map(|f| f.handle).collect();
        assert_eq!(handles, vec![0, 1]);
    }

    #[test]
    fn test_find_directive_by_name() {
        let (scene, placed) = placed_trees();

        let directive = find_directive(&scene, &placed, "ACER_1").unwrap();
        assert_eq!(directive.display_name(), "ACER_1");
        assert_eq!(directive.scale().y, 10.0);
    }

    #[test]
    fn test_find_unknown_name_lists_placed_features() {
        let (scene, placed) = placed_trees();

        let err = find_directive(&scene, &placed, "QUERCUS_0").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("No feature named 'QUERCUS_0'"));
        assert!(message.contains("ACER_1, TILIA_0"));
    }

    #[test]
    fn test_print_placements_with_find() {
        let (scene, placed) = placed_trees();
        let output = |name: &str| OutputArgs {
            json: true,
            find: Some(name.to_string()),
        };

        assert!(print_placements(&scene, &placed, &[], &output("TILIA_0")).is_ok());
        assert!(matches!(
            print_placements(&scene, &placed, &[], &output("TILIA_9")),
            Err(CliError::Config(_))
        ));
        assert!(print_placements(&scene, &placed, &[], &OutputArgs::default()).is_ok());
    }
}
