//! Error handling for the watchboard model layer.
//!
//! This module defines the error types used throughout the crate, built with
//! the `thiserror` crate. The main error type is [`BoardError`], which wraps
//! the more specific [`BuildError`], [`ConfigError`] and [`LoggingError`].
//!
//! Construction-time validation ("required field present", mutually exclusive
//! options, range checks) surfaces as [`BuildError`] synchronously when the
//! value is built, never later. Render-time failures — the only ones possible
//! are conflicting metric identifiers and JSON serialization itself — surface
//! as [`BoardError`] from [`Dashboard::render`](crate::dashboard::Dashboard::render).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the watchboard crate.
///
/// Wraps the specific error families so callers can hold one error type
/// across configuration loading, logging setup, model construction and
/// dashboard rendering.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A value failed its construction-time validation.
    #[error("Construction error: {0}")]
    Build(#[from] BuildError),

    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur while initializing the logging system.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Two different metric definitions were assigned the same identifier
    /// within one widget's metric set. The wire format keys sub-metrics by
    /// id, so the document cannot express both.
    #[error("Duplicate metric id '{id}' refers to two different metrics")]
    DuplicateMetricId { id: String },

    /// JSON serialization of the assembled document failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General I/O errors not covered by other variants.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Construction-time validation failure for a model value.
///
/// Every model entity is built from a strongly-typed props struct and
/// validated when constructed; these are the ways that validation can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A required identifying field was missing or empty.
    #[error("{entity}: missing required field '{field}'")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// An operator that needs at least one operand received none.
    #[error("{operator} requires at least one operand")]
    EmptyOperands { operator: &'static str },

    /// Two options that cannot both be set were both set.
    #[error("{entity}: '{first}' and '{second}' are mutually exclusive")]
    MutuallyExclusive {
        entity: &'static str,
        first: &'static str,
        second: &'static str,
    },

    /// A combination of options that the wire format cannot express.
    #[error("{entity}: {message}")]
    Incompatible {
        entity: &'static str,
        message: String,
    },

    /// A numeric field was outside its allowed range.
    #[error("{entity}: '{field}' must be within {min}..={max}, got {value}")]
    OutOfRange {
        entity: &'static str,
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`BoardError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An error occurred while reading a configuration file.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error occurred while parsing a configuration file as TOML.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration parsed but contained invalid values.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// No configuration directory could be determined for this platform.
    #[error("Could not determine a configuration directory")]
    NoConfigDirectory,
}

/// Error type for logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Setting up the global subscriber failed.
    #[error("Logging initialization failed: {0}")]
    InitializationFailure(String),

    /// The configured log file could not be prepared.
    #[error("Failed to prepare log file at {path:?}")]
    FileSetup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_error_messages_name_entity_and_field() {
        let err = BuildError::MissingField {
            entity: "Metric",
            field: "namespace",
        };
        assert_eq!(err.to_string(), "Metric: missing required field 'namespace'");
    }

    #[test]
    fn board_error_wraps_build_error() {
        let err: BoardError = BuildError::EmptyOperands { operator: "AND" }.into();
        assert!(matches!(err, BoardError::Build(_)));
        assert!(err.to_string().contains("AND requires at least one operand"));
    }

    #[test]
    fn out_of_range_formats_bounds() {
        let err = BuildError::OutOfRange {
            entity: "GraphWidget",
            field: "width",
            min: 1,
            max: 24,
            value: 30,
        };
        assert_eq!(
            err.to_string(),
            "GraphWidget: 'width' must be within 1..=24, got 30"
        );
    }
}
