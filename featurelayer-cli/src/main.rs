//! featurelayer CLI - Command-line interface
//!
//! Queries a feature layer and prints where each returned feature would be
//! placed in a scene.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::fetch::FetchArgs;
use commands::parse::ParseArgs;
use commands::query::QueryArgs;

#[derive(Parser)]
#[command(name = "featurelayer")]
#[command(version, about = "Turn feature service queries into scene placements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the query URL for the given filters without sending it
    Query(QueryArgs),

    /// Query the feature service and print placements
    Fetch(FetchArgs),

    /// Map features from a saved GeoJSON file
    Parse(ParseArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Query(args) => commands::query::run(args),
        Commands::Fetch(args) => commands::fetch::run(args).await,
        Commands::Parse(args) => commands::parse::run(args),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
