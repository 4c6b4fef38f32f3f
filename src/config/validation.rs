//! Configuration validation.
//!
//! Provides the `Validatable` trait and implementations for all
//! configuration sections.

use super::types::{AppConfig, OutputConfig, RemoteConfig, ScoringConfig, SessionConfig, SourceConfig};
use crate::scoring::ScoringWeights;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.scoring.validate());
        errors.extend(self.source.validate());
        errors.extend(self.output.validate());
        errors.extend(self.session.validate());
        errors
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.weights.validate();
        if let Some(ref test_type) = self.default_test_type {
            if test_type.trim().is_empty() {
                errors.push(ConfigError::new(
                    "scoring.default_test_type",
                    "Test type must not be empty",
                ));
            }
        }
        errors
    }
}

impl Validatable for ScoringWeights {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let coefficients = [
            ("throughput_weight", self.throughput_weight),
            ("latency_ceiling", self.latency_ceiling),
            ("latency_divisor", self.latency_divisor),
            ("availability_floor", self.availability_floor),
            ("utilization_divisor", self.utilization_divisor),
            ("scale_weight", self.scale_weight),
            ("api_throughput_divisor", self.api_throughput_divisor),
            ("database_consistency_weight", self.database_consistency_weight),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() {
                errors.push(ConfigError::new(
                    &format!("scoring.weights.{name}"),
                    format!("Coefficient must be a finite number, got {value}"),
                ));
            }
        }

        let divisors = [
            ("latency_divisor", self.latency_divisor),
            ("utilization_divisor", self.utilization_divisor),
            ("api_throughput_divisor", self.api_throughput_divisor),
        ];
        for (name, value) in divisors {
            if value == 0.0 {
                errors.push(ConfigError::new(
                    &format!("scoring.weights.{name}"),
                    "Divisor must not be zero",
                ));
            }
        }
        errors
    }
}

impl Validatable for SourceConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.remote.validate()
    }
}

impl Validatable for RemoteConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        match url::Url::parse(&self.api_base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ConfigError::new(
                "source.remote.api_base",
                format!("Unsupported scheme '{}', expected http or https", url.scheme()),
            )),
            Err(e) => errors.push(ConfigError::new(
                "source.remote.api_base",
                format!("Invalid URL '{}': {e}", self.api_base),
            )),
        }

        if self.model.trim().is_empty() {
            errors.push(ConfigError::new("source.remote.model", "Model must not be empty"));
        }
        if self.api_key_env.trim().is_empty() {
            errors.push(ConfigError::new(
                "source.remote.api_key_env",
                "Environment variable name must not be empty",
            ));
        }
        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "source.remote.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }
        errors
    }
}

impl Validatable for SessionConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref dir) = self.dir {
            if dir.is_file() {
                errors.push(ConfigError::new(
                    "session.dir",
                    format!("Session path is a file: {}", dir.display()),
                ));
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_zero_divisor_is_invalid() {
        let mut config = AppConfig::default();
        config.scoring.weights.latency_divisor = 0.0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "scoring.weights.latency_divisor");
    }

    #[test]
    fn test_non_finite_weight_is_invalid() {
        let mut config = AppConfig::default();
        config.scoring.weights.scale_weight = f64::NAN;
        assert!(!config.is_valid());
    }

    #[test]
    fn test_remote_endpoint_validation() {
        let mut config = RemoteConfig::default();
        config.api_base = "ftp://example.com".to_string();
        config.timeout_secs = 0;
        let errors = config.validate();
        assert_eq!(errors.len(), 2);

        config.api_base = "not a url".to_string();
        assert!(!config.is_valid());
    }

    #[test]
    fn test_output_file_parent_must_exist() {
        let config = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/report.json")),
            ..OutputConfig::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_session_dir_must_not_be_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let config = SessionConfig {
            enabled: true,
            dir: Some(tmp.path().to_path_buf()),
        };
        assert!(!config.is_valid());
    }
}
