//! Live fetch command: query, parse, map and print.

use clap::Args;
use tracing::info;

use super::common::{print_placements, FilterArgs, OutputArgs, OutputScene};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `featurelayer fetch`.
#[derive(Debug, Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Feature layer URL (default: [service] url from config.ini)
    #[arg(long)]
    pub url: Option<String>,
}

pub async fn run(args: FetchArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("fetch");

    let params = args.filters.to_query_parameters(runner.config())?;
    let layer = runner.feature_layer(args.url.as_deref())?;
    let mapper = runner.mapper()?;

    let mut scene = OutputScene::default();
    let population = layer.populate(&params, &mapper, &mut scene).await?;
    info!(
        placed = population.placed.len(),
        skipped = population.skipped.len(),
        "Fetch complete"
    );

    print_placements(&scene, &population.placed, &population.skipped, &args.output)
}
