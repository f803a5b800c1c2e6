//! Query preview command.

use clap::Args;
use featurelayer::config::ConfigFile;
use featurelayer::query::QueryBuilder;

use super::common::FilterArgs;
use crate::error::CliError;

/// Arguments for `featurelayer query`.
#[derive(Debug, Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Feature layer URL (default: [service] url from config.ini)
    #[arg(long)]
    pub url: Option<String>,
}

/// Print the request that `fetch` would send.
///
/// Without a layer URL only the query string is printed.
pub fn run(args: QueryArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let params = args.filters.to_query_parameters(&config)?;
    let builder = QueryBuilder::new();

    match args.url.as_deref().or(config.service.url.as_deref()) {
        Some(url) => println!("{}", builder.query_url(url, &params)?),
        None => println!("{}", builder.build(&params)?),
    }
    Ok(())
}
