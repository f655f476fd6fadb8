//! Configuration file loading for parcel-resolver
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PARCEL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./parcel.toml` or `./.parcel.toml`
//! 4. Global: `<config dir>/parcel-resolver/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAccessConfig, FileApiConfig, FileConfig, FileDocumentConfig,
    FileEngineConfig, FileOutputConfig, FileShapeConfig,
};
pub use loader::{ACCESS_KEY_ENV, ConfigLoader, ENV_PREFIX};
