//! Configuration data structures.
//!
//! These structs are populated by deserializing a TOML configuration file.
//! Missing fields take default values from the [`super::defaults`] module;
//! unknown fields are rejected via `#[serde(deny_unknown_fields)]`, so a
//! misspelled option is a load error rather than a silently ignored key.

use super::defaults;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the logging subsystem.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// The minimum log level to record, case-insensitive:
    /// "trace", "debug", "info", "warn" or "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional path to a log file. If `None`, file logging is disabled.
    #[serde(default)]
    pub file_path: Option<PathBuf>,
    /// The log message format, "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Layout defaults applied when assembling dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Width of the dashboard grid, in layout units.
    #[serde(default = "defaults::default_grid_width")]
    pub grid_width: u32,
    /// Default aggregation period for newly authored metrics, in seconds.
    #[serde(default = "defaults::default_period_seconds")]
    pub default_period_seconds: u64,
    /// Region applied to widgets that do not name one.
    #[serde(default)]
    pub default_region: Option<String>,
}

impl LayoutConfig {
    /// The default metric period as a duration.
    pub fn default_period(&self) -> Duration {
        Duration::from_secs(self.default_period_seconds)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        defaults::default_layout_config()
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}
