//! Configuration loading.
//!
//! [`ConfigLoader::load`] reads `config.toml` from the platform configuration
//! directory; a missing file is not an error — the built-in defaults are used
//! instead. [`ConfigLoader::from_path`] reads an explicit file and does treat
//! a missing file as an error. Both validate the result after parsing.

use crate::config::BoardConfig;
use crate::error::{BoardError, ConfigError};
use directories_next::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Namespace for configuration loading logic; the entry points are
/// [`ConfigLoader::load`] and [`ConfigLoader::from_path`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration from the platform configuration
    /// directory, falling back to defaults when no file exists.
    pub fn load() -> Result<BoardConfig, BoardError> {
        let path = Self::default_config_path()?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), "loading configuration file");
                Self::parse_and_validate(&content, &path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file; using defaults");
                let config = BoardConfig::default();
                Self::validate(&config)?;
                Ok(config)
            }
            Err(source) => Err(ConfigError::ReadError { path, source }.into()),
        }
    }

    /// Loads and validates the configuration from an explicit path. Unlike
    /// [`ConfigLoader::load`], a missing file is an error here.
    pub fn from_path(path: &Path) -> Result<BoardConfig, BoardError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_and_validate(&content, path)
    }

    fn parse_and_validate(content: &str, path: &Path) -> Result<BoardConfig, BoardError> {
        let config: BoardConfig =
            toml::from_str(content).map_err(ConfigError::ParseError)?;
        Self::validate(&config)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Checks the values that parsing alone cannot: level and format are
    /// recognized spellings, the grid has room for at least one widget, and
    /// the default period is a usable duration.
    fn validate(config: &BoardConfig) -> Result<(), ConfigError> {
        let level = config.logging.level.to_lowercase();
        if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
            return Err(ConfigError::ValidationError(format!(
                "invalid log level '{}'",
                config.logging.level
            )));
        }
        let format = config.logging.format.to_lowercase();
        if !matches!(format.as_str(), "text" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "invalid log format '{}'",
                config.logging.format
            )));
        }
        if config.layout.grid_width == 0 {
            return Err(ConfigError::ValidationError(
                "layout.grid_width must be at least 1".to_string(),
            ));
        }
        if config.layout.default_period_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "layout.default_period_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("io", "Watchboard", "watchboard")
            .ok_or(ConfigError::NoConfigDirectory)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
