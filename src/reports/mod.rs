//! Report generation for analyses, rankings and comparisons.
//!
//! This module provides multiple output formats:
//! - Summary: Compact shell-friendly output
//! - Table: Aligned tabular terminal output
//! - JSON: Structured data for programmatic integration
//! - Markdown: Human-readable documentation
//! - CSV: Spreadsheet import
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! Text that may come from a remote source (rationale, URLs) is escaped
//! before it is embedded in Markdown tables or CSV fields.

mod csv;
pub mod escape;
mod json;
mod markdown;
mod summary;
mod types;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::{SummaryReporter, TableReporter};
pub use types::{ReportConfig, ReportFormat};

use crate::analysis::AnalysisReport;
use crate::model::ComparisonResult;
use crate::scoring::Ranking;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a full analysis
    fn generate_analysis_report(
        &self,
        report: &AnalysisReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Render a ranking produced outside an analysis (e.g. from a file)
    fn generate_ranking_report(
        &self,
        ranking: &Ranking,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Render a before/after comparison
    fn generate_comparison_report(
        &self,
        comparison: &ComparisonResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write an analysis report to a writer
    fn write_analysis_report(
        &self,
        report: &AnalysisReport,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let text = self.generate_analysis_report(report, config)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a reporter for `format`.
///
/// `colored` only affects terminal formats.
#[must_use]
pub fn create_reporter(format: ReportFormat, colored: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            let reporter = SummaryReporter::new();
            Box::new(if colored { reporter } else { reporter.no_color() })
        }
        ReportFormat::Table => {
            let reporter = TableReporter::new();
            Box::new(if colored { reporter } else { reporter.no_color() })
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}

/// Format a signed improvement percentage, e.g. `+48.6%`.
pub(crate) fn format_pct(pct: f64) -> String {
    format!("{pct:+.1}%")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::analysis::{AnalysisReport, AnalysisRequest, Analyzer};
    use crate::scoring::ScoringEngine;
    use crate::source::SyntheticSource;

    pub fn report() -> AnalysisReport {
        Analyzer::new(ScoringEngine::default(), Box::new(SyntheticSource::new(42)))
            .analyze(&AnalysisRequest::new("https://shop.example.com"))
            .unwrap()
    }
}
