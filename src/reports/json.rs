//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::analysis::AnalysisReport;
use crate::model::ComparisonResult;
use crate::scoring::Ranking;
use serde::Serialize;

/// JSON report generator.
///
/// Emits the data model unchanged, with camelCase field names.
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter with pretty printing
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Emit compact single-line JSON
    #[must_use]
    pub const fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map(|s| s + "\n")
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_analysis_report(
        &self,
        report: &AnalysisReport,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(report)
    }

    fn generate_ranking_report(
        &self,
        ranking: &Ranking,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(ranking)
    }

    fn generate_comparison_report(
        &self,
        comparison: &ComparisonResult,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(comparison)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
