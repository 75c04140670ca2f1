//! Default configuration values.
//!
//! These functions back the `#[serde(default = "...")]` attributes on the
//! configuration structures, providing values for fields not present in the
//! configuration file.

use crate::config::{LayoutConfig, LoggingConfig};
use crate::types::GRID_WIDTH;

/// Returns the default `LoggingConfig`, used when the `logging` section is
/// missing entirely.
pub(super) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: None,
        format: default_log_format(),
    }
}

/// Returns the default log level string (`"info"`).
pub(super) fn default_log_level() -> String {
    "info".to_string()
}

/// Returns the default log format string (`"text"`).
pub(super) fn default_log_format() -> String {
    "text".to_string()
}

/// Returns the default `LayoutConfig`, used when the `layout` section is
/// missing entirely.
pub(super) fn default_layout_config() -> LayoutConfig {
    LayoutConfig {
        grid_width: default_grid_width(),
        default_period_seconds: default_period_seconds(),
        default_region: None,
    }
}

/// Returns the default grid width (24 layout units).
pub(super) fn default_grid_width() -> u32 {
    GRID_WIDTH
}

/// Returns the default metric period in seconds (300).
pub(super) fn default_period_seconds() -> u64 {
    300
}
