//! CLI runner for common setup.
//!
//! Loads the config file and initializes logging so command handlers only
//! deal with their own work.

use tracing::info;

use featurelayer::config::ConfigFile;
use featurelayer::layer::FeatureLayer;
use featurelayer::logging::{init_logging, LoggingGuard};
use featurelayer::placement::PlacementMapper;
use featurelayer::transport::AsyncReqwestClient;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    pub fn new() -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let logging_guard = init_logging(&config.logging.directory, &config.logging.file)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("featurelayer v{}", featurelayer::VERSION);
        info!("featurelayer CLI: {} command", command);
    }

    /// Create a layer client for `url`, or for the configured service URL.
    pub fn feature_layer(
        &self,
        url: Option<&str>,
    ) -> Result<FeatureLayer<AsyncReqwestClient>, CliError> {
        let url = match url {
            Some(url) => url,
            None => self.config.service_url()?,
        };
        let timeout = self.config.timeout();
        let client = AsyncReqwestClient::with_timeout(timeout)?;
        info!(url, timeout_secs = timeout.as_secs(), "Feature layer client ready");
        Ok(FeatureLayer::new(client, url).with_timeout(timeout))
    }

    /// Create a mapper from the `[placement]` and `[assets]` settings.
    pub fn mapper(&self) -> Result<PlacementMapper, CliError> {
        Ok(PlacementMapper::new(self.config.to_mapping_context()?))
    }
}
