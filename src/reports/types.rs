//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Brief summary output
    #[default]
    Summary,
    /// Aligned table of every pattern and metric (colored)
    Table,
    /// Structured JSON output
    Json,
    /// Human-readable Markdown
    #[value(alias = "md")]
    Markdown,
    /// CSV for spreadsheet import
    Csv,
}

impl ReportFormat {
    /// Whether the format is meant for a terminal
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Summary | Self::Table)
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Include each pattern's benefits and limitations
    pub include_pattern_details: bool,
}

impl ReportConfig {
    #[must_use]
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub(crate) fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }
}
