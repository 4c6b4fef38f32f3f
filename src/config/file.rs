//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use crate::source::SourceKind;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[".archscale.yaml", ".archscale.yml", "archscale.yaml"];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/archscale/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("archscale")) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Command-Line Overrides
// ============================================================================

/// Values given explicitly on the command line.
///
/// Every value that is set here replaces the file value, even when it
/// equals the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub source_kind: Option<SourceKind>,
    pub seed: Option<u64>,
    pub no_fallback: bool,
    pub format: Option<ReportFormat>,
    pub output_file: Option<PathBuf>,
    pub no_color: bool,
}

impl AppConfig {
    /// Apply explicit command-line values on top of this config.
    pub fn apply_cli(&mut self, cli: &CliOverrides) {
        if let Some(kind) = cli.source_kind {
            self.source.kind = kind;
        }
        if cli.seed.is_some() {
            self.source.seed = cli.seed;
        }
        if cli.no_fallback {
            self.source.fallback = false;
        }
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if cli.output_file.is_some() {
            self.output.file.clone_from(&cli.output_file);
        }
        if cli.no_color {
            self.output.no_color = true;
        }
    }

    /// Load from file, then apply explicit command-line values.
    #[must_use]
    pub fn from_file_with_cli(
        config_path: Option<&Path>,
        cli: &CliOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.apply_cli(cli);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config(config: &AppConfig) -> String {
    format!(
        r"# archscale configuration
# Place this file at .archscale.yaml in your project root or ~/.config/archscale/

{}",
        serde_yaml::to_string(config).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# archscale configuration file
# =============================
#
# Place it at:
#   - .archscale.yaml in your project root
#   - ~/.config/archscale/archscale.yaml for global config
#
# CLI arguments always override file settings.

# Scoring formula
scoring:
  weights:
    throughput_weight: 2.0        # per 1000 requests/sec
    latency_ceiling: 500.0        # ms at which the latency term is zero
    latency_divisor: 100.0
    availability_floor: 95.0      # % at which the availability term is zero
    utilization_divisor: 10.0
    scale_weight: 1.0             # fault tolerance, elasticity, cost, consistency
    api_throughput_divisor: 500.0 # api context bonus = throughput / this
    database_consistency_weight: 1.5
  # Test type when none is given: general, api, database
  # default_test_type: api

# Metric source
source:
  # synthetic or remote
  kind: synthetic
  # Fixed seed for reproducible synthetic metrics
  # seed: 42
  # Use baseline metrics when the remote source fails
  fallback: true
  remote:
    api_base: https://api.groq.com/openai/v1
    model: llama-3.3-70b-versatile
    api_key_env: GROQ_API_KEY
    timeout_secs: 30

# Output configuration
output:
  # Format: summary, table, json, markdown, csv
  format: summary
  # Output file path (omit for stdout)
  # file: report.json
  no_color: false

# Session store
session:
  enabled: true
  # dir: ~/.cache/archscale/session
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".archscale.yaml");
        std::fs::write(&config_path, "source:\n  seed: 1\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_dotfile() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("archscale.yaml"), "").unwrap();
        std::fs::write(tmp.path().join(".archscale.yml"), "").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(tmp.path().join(".archscale.yml")));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
source:
  kind: remote
  fallback: false
output:
  format: markdown
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.source.kind, SourceKind::Remote);
        assert!(!config.source.fallback);
        assert_eq!(config.output.format, ReportFormat::Markdown);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yaml");
        std::fs::write(&path, "source: [unclosed").unwrap();
        assert!(matches!(
            load_config_file(&path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_cli_values_replace_file_values() {
        let mut config = AppConfig::builder()
            .seed(1)
            .output_format(ReportFormat::Markdown)
            .build();
        config.source.kind = SourceKind::Remote;

        config.apply_cli(&CliOverrides {
            source_kind: Some(SourceKind::Synthetic),
            seed: Some(99),
            no_color: true,
            ..CliOverrides::default()
        });

        assert_eq!(config.source.kind, SourceKind::Synthetic);
        assert_eq!(config.source.seed, Some(99));
        // unset values leave the file alone
        assert_eq!(config.output.format, ReportFormat::Markdown);
        assert!(config.source.fallback);
        assert!(config.output.no_color);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config(&AppConfig::default());
        assert!(example.contains("scoring:"));
        assert!(example.contains("throughput_weight"));

        let full: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "source:\n  seed: 5").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
