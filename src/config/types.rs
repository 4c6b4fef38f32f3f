//! Configuration types for archscale.
//!
//! Every section is `#[serde(default)]`, so a config file only needs to
//! name the values it changes.

use crate::reports::ReportFormat;
use crate::scoring::ScoringWeights;
use crate::source::SourceKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_API_BASE, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// It can be constructed from CLI arguments, config files, or both
/// (with CLI overriding file settings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Scoring formula coefficients and default context
    pub scoring: ScoringConfig,
    /// Where metrics come from
    pub source: SourceConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Session store settings
    pub session: SessionConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the scoring weights.
    pub fn weights(mut self, weights: ScoringWeights) -> Self {
        self.config.scoring.weights = weights;
        self
    }

    /// Set the default test type.
    pub fn default_test_type(mut self, test_type: impl Into<String>) -> Self {
        self.config.scoring.default_test_type = Some(test_type.into());
        self
    }

    /// Set the metric source.
    pub const fn source(mut self, kind: SourceKind) -> Self {
        self.config.source.kind = kind;
        self
    }

    /// Set the synthetic source seed.
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.source.seed = Some(seed);
        self
    }

    /// Enable or disable the baseline fallback for the remote source.
    pub const fn fallback(mut self, enabled: bool) -> Self {
        self.config.source.fallback = enabled;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable or disable session persistence.
    pub const fn session(mut self, enabled: bool) -> Self {
        self.config.session.enabled = enabled;
        self
    }

    /// Set the session directory.
    pub fn session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.session.dir = Some(dir.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Scoring configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Coefficients of the scoring formula
    pub weights: ScoringWeights,
    /// Test type used when none is given (general, api, database)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_test_type: Option<String>,
}

/// Metric source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SourceConfig {
    /// Source kind: synthetic or remote
    pub kind: SourceKind,
    /// Seed for the synthetic source; random when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Substitute baseline metrics when the remote source fails
    pub fallback: bool,
    /// Remote source settings
    pub remote: RemoteConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            seed: None,
            fallback: true,
            remote: RemoteConfig::default(),
        }
    }
}

/// Remote chat-completions endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of an OpenAI-compatible API
    pub api_base: String,
    /// Model name sent with each request
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Session store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SessionConfig {
    /// Save each analysis as the latest and viewed report
    pub enabled: bool,
    /// Directory for session files (defaults to the user cache dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}
