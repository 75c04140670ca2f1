//! Logging setup, built on the `tracing` ecosystem.
//!
//! Two tiers, matching how the crate is used: [`init_minimal_logging`] for
//! tests and early startup, and [`initialize_logging`] for a configured
//! setup with console output and an optional daily-rolling file layer.

use crate::config::LoggingConfig;
use crate::error::{BoardError, LoggingError};
use once_cell::sync::Lazy;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Holds the worker guard for the file logger so buffered log lines are
/// flushed when the process exits.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initializes a minimal logging setup directed at `stderr`.
///
/// Intended for tests and early startup before configuration is loaded.
/// Filters via `RUST_LOG`, defaulting to "info". Errors (e.g. a global
/// subscriber already being set) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Initializes the global logging system from a [`LoggingConfig`]: a console
/// layer in the configured format, plus a file layer when `file_path` is
/// set.
pub fn initialize_logging(config: &LoggingConfig) -> Result<(), BoardError> {
    let level = match config.level.to_lowercase().as_str() {
        level @ ("trace" | "debug" | "info" | "warn" | "error") => level.to_string(),
        invalid => {
            return Err(LoggingError::InitializationFailure(format!(
                "invalid log level in config: {}",
                invalid
            ))
            .into());
        }
    };

    let stdout_filter = EnvFilter::new(level.clone());
    let stdout_layer: Box<dyn Layer<Registry> + Send + Sync + 'static> =
        match config.format.to_lowercase().as_str() {
            "json" => fmt::layer()
                .json()
                .with_writer(stdout)
                .with_ansi(false)
                .with_filter(stdout_filter)
                .boxed(),
            _ => fmt::layer()
                .with_writer(stdout)
                .with_ansi(atty::is(atty::Stream::Stdout))
                .with_filter(stdout_filter)
                .boxed(),
        };

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync + 'static>> = vec![stdout_layer];
    let mut file_guard: Option<WorkerGuard> = None;
    if let Some(path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(path, &config.format)?;
        layers.push(file_layer.with_filter(EnvFilter::new(level)).boxed());
        file_guard = Some(guard);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| {
            LoggingError::InitializationFailure(format!(
                "failed to set the global subscriber (already initialized?): {}",
                e
            ))
        })?;

    if let Ok(mut slot) = LOG_WORKER_GUARD.lock() {
        *slot = file_guard;
    }
    Ok(())
}

/// Creates the daily-rolling, non-blocking file layer, creating the parent
/// directory if needed.
fn create_file_layer(
    path: &Path,
    format: &str,
) -> Result<(Box<dyn Layer<Registry> + Send + Sync + 'static>, WorkerGuard), BoardError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| LoggingError::FileSetup {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let appender = tracing_appender::rolling::daily(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("watchboard.log")),
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer: Box<dyn Layer<Registry> + Send + Sync + 'static> =
        match format.to_lowercase().as_str() {
            "json" => fmt::layer().json().with_writer(writer).with_ansi(false).boxed(),
            _ => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
        };
    Ok((layer, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_is_rejected() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            ..Default::default()
        };
        let err = initialize_logging(&config).unwrap_err();
        assert!(matches!(err, BoardError::Logging(_)));
    }

    #[test]
    fn minimal_init_is_idempotent() {
        init_minimal_logging();
        init_minimal_logging();
    }
}
