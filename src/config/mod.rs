//! Configuration module for archscale.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.archscale.yaml` file in your project root or `~/.config/archscale/`:
//!
//! ```yaml
//! source:
//!   kind: synthetic
//!   seed: 42
//! output:
//!   format: markdown
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    ConfigPreset, DEFAULT_API_BASE, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, DEFAULT_SEED,
    DEFAULT_TIMEOUT_SECS,
};
pub use types::{
    AppConfig, AppConfigBuilder, OutputConfig, RemoteConfig, ScoringConfig, SessionConfig,
    SourceConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, CliOverrides, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate `.archscale.yaml` files.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
