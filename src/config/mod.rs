//! Configuration for dashboard authoring tools.
//!
//! Configuration is TOML-based: [`BoardConfig`] is the root structure,
//! deserialized with defaults applied for missing fields and unknown fields
//! rejected. [`ConfigLoader`] locates and loads the file, falling back to
//! the built-in defaults when none exists.

mod defaults;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BoardConfig, LayoutConfig, LoggingConfig};
