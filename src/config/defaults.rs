//! Default values and named presets.

use super::types::{AppConfig, OutputConfig, SessionConfig, SourceConfig};
use crate::reports::ReportFormat;
use crate::source::SourceKind;

/// Default base URL of the remote chat-completions API
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
/// Default model for remote analysis
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
/// Default environment variable holding the remote API key
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
/// Default remote request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Seed used by the reproducible preset
pub const DEFAULT_SEED: u64 = 42;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Synthetic metrics, human-readable output, session on
    Default,
    /// Synthetic metrics with a fixed seed
    Reproducible,
    /// Remote analysis with baseline fallback
    Remote,
    /// JSON output, no colors, no session files
    CiCd,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Reproducible => "reproducible",
            Self::Remote => "remote",
            Self::CiCd => "ci-cd",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "reproducible" | "seeded" => Some(Self::Reproducible),
            "remote" | "llm" => Some(Self::Remote),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Synthetic metrics with a random seed and summary output",
            Self::Reproducible => "Synthetic metrics with a fixed seed for repeatable results",
            Self::Remote => "Remote analysis, falling back to baseline metrics on failure",
            Self::CiCd => "Reproducible JSON output without colors or session files",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Reproducible, Self::Remote, Self::CiCd]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Reproducible => Self::reproducible_preset(),
            ConfigPreset::Remote => Self::remote_preset(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
        }
    }

    #[must_use]
    pub fn reproducible_preset() -> Self {
        Self {
            source: SourceConfig {
                seed: Some(DEFAULT_SEED),
                ..SourceConfig::default()
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn remote_preset() -> Self {
        Self {
            source: SourceConfig {
                kind: SourceKind::Remote,
                fallback: true,
                ..SourceConfig::default()
            },
            ..Self::default()
        }
    }

    /// CI/CD preset.
    ///
    /// - Fixed seed
    /// - JSON output without colors
    /// - No session files
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            source: SourceConfig {
                seed: Some(DEFAULT_SEED),
                ..SourceConfig::default()
            },
            output: OutputConfig {
                format: ReportFormat::Json,
                file: None,
                no_color: true,
            },
            session: SessionConfig {
                enabled: false,
                dir: None,
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_roundtrip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("CI"), Some(ConfigPreset::CiCd));
        assert_eq!(ConfigPreset::from_name("unknown"), None);
    }

    #[test]
    fn test_ci_cd_preset() {
        let config = AppConfig::from_preset(ConfigPreset::CiCd);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.output.no_color);
        assert!(!config.session.enabled);
        assert_eq!(config.source.seed, Some(DEFAULT_SEED));
    }

    #[test]
    fn test_remote_preset() {
        let config = AppConfig::from_preset(ConfigPreset::Remote);
        assert_eq!(config.source.kind, SourceKind::Remote);
        assert!(config.source.fallback);
    }
}
