//! Output configuration from TOML (`[output]` section)

use parcel_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Raw output configuration from TOML
///
/// ```toml
/// [output]
/// format = "json"        # "summary" or "json"
/// color = true
/// show_progress = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// `None` lets the CLI flag decide
    pub format: Option<OutputFormat>,
    pub color: bool,
    /// Spinner while attempts run
    pub show_progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            show_progress: true,
        }
    }
}
