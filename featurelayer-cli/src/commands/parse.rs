//! Offline parse command: map a saved GeoJSON response.

use std::path::PathBuf;

use clap::Args;
use featurelayer::feature::parse_feature_collection_bytes;
use featurelayer::scene::PlacedFeatures;
use tracing::info;

use super::common::{print_placements, OutputArgs, OutputScene};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `featurelayer parse`.
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// GeoJSON file saved from a feature service query
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: ParseArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("parse");

    let payload = std::fs::read(&args.file).map_err(|error| CliError::FileRead {
        path: args.file.display().to_string(),
        error,
    })?;
    let records = parse_feature_collection_bytes(&payload)?;
    info!(file = %args.file.display(), features = records.len(), "Parsed feature collection");

    let report = runner.mapper()?.map_all(&records);

    let mut scene = OutputScene::default();
    let mut placed = PlacedFeatures::new();
    placed.instantiate_all(&mut scene, report.directives);

    print_placements(&scene, &placed, &report.skipped, &args.output)
}
