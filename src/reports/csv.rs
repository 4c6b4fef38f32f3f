//! CSV report generator.
//!
//! Generates comma-separated reports suitable for spreadsheet import and
//! data analysis pipelines.

use super::escape::csv_field;
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::analysis::AnalysisReport;
use crate::model::{ComparisonResult, MetricKey};
use crate::scoring::Ranking;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn ranking_rows(content: &mut String, ranking: &Ranking) {
        content.push_str("Rank,Pattern,Name,Score");
        for key in MetricKey::ALL {
            content.push(',');
            content.push_str(key.as_str());
        }
        content.push('\n');

        for entry in &ranking.ranked {
            content.push_str(&format!(
                "{},{},{},{:.4}",
                entry.rank,
                csv_field(&entry.pattern.id),
                csv_field(&entry.pattern.name),
                entry.score
            ));
            for (_, value) in entry.metrics.iter() {
                content.push_str(&format!(",{value}"));
            }
            content.push('\n');
        }
    }

    fn comparison_rows(content: &mut String, comparison: &ComparisonResult) {
        content.push_str("Metric,Unit,Before,After,Improvement %\n");
        for (key, pct) in comparison.improvement_percentages.iter() {
            content.push_str(&format!(
                "{},{},{},{},{:.2}\n",
                key.as_str(),
                csv_field(key.unit()),
                comparison.before_scaling.get(key),
                comparison.after_scaling.get(key),
                pct
            ));
        }
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate_analysis_report(
        &self,
        report: &AnalysisReport,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str("# Patterns\n");
        Self::ranking_rows(&mut content, &report.ranking);

        content.push_str(&format!(
            "\n# Comparison ({})\n",
            report.comparison_result.pattern_used
        ));
        Self::comparison_rows(&mut content, &report.comparison_result);

        if !report.ranking.rejected.is_empty() {
            content.push_str("\n# Rejected\nPattern,Reason\n");
            for rejected in &report.ranking.rejected {
                content.push_str(&format!(
                    "{},{}\n",
                    csv_field(&rejected.pattern_id),
                    csv_field(&rejected.reason)
                ));
            }
        }
        Ok(content)
    }

    fn generate_ranking_report(
        &self,
        ranking: &Ranking,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        Self::ranking_rows(&mut content, ranking);
        Ok(content)
    }

    fn generate_comparison_report(
        &self,
        comparison: &ComparisonResult,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        Self::comparison_rows(&mut content, comparison);
        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}
