//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use featurelayer::config::ConfigFileError;
use featurelayer::feature::ParseError;
use featurelayer::layer::LayerError;
use featurelayer::query::QueryError;
use featurelayer::transport::TransportError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid command-line arguments
    Config(String),
    /// Failed to load or save config.ini
    ConfigFile(ConfigFileError),
    /// Query, transport or parse failure
    Layer(LayerError),
    /// Failed to read an input file
    FileRead { path: String, error: std::io::Error },
    /// Failed to render output
    Output(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Layer(LayerError::Configuration(QueryError::ConflictingFilters)) => {
                eprintln!();
                eprintln!("A query filters by attribute or by distance, not both.");
                eprintln!("Drop either --where/--where-field or --near/--radius,");
                eprintln!("or clear one of the filters in config.ini.");
            }
            CliError::Layer(LayerError::Transport(TransportError::Timeout(_))) => {
                eprintln!();
                eprintln!("The feature service did not answer in time.");
                eprintln!("Raise [service] timeout in config.ini or pass a smaller --limit.");
            }
            CliError::Layer(LayerError::Parse(ParseError::ServiceError { .. })) => {
                eprintln!();
                eprintln!("The service rejected the query. Check that the names given to");
                eprintln!("--fields and --where-field exist on the layer.");
            }
            CliError::ConfigFile(_) => {
                eprintln!();
                eprintln!("Run 'featurelayer config path' to locate the config file.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Layer(e) => write!(f, "{}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Layer(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<LayerError> for CliError {
    fn from(e: LayerError) -> Self {
        CliError::Layer(e)
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        CliError::Layer(LayerError::Configuration(e))
    }
}

impl From<TransportError> for CliError {
    fn from(e: TransportError) -> Self {
        CliError::Layer(LayerError::Transport(e))
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Layer(LayerError::Parse(e))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
