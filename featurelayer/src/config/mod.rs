//! User configuration for the feature layer tools.
//!
//! Settings live in `~/.featurelayer/config.ini`. A missing file means
//! defaults; a present file overlays them section by section.
//!
//! ```
//! use featurelayer::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! let params = config.to_query_parameters().unwrap();
//! assert_eq!(params.out_sr.wkid(), 4326);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    AssetSettings, ConfigFile, LoggingSettings, PlacementSettings, QuerySettings, ServiceSettings,
};
