//! Analyze command handler.
//!
//! Implements the `analyze` subcommand: fetch metrics for a URL, rank the
//! patterns and report the recommendation.

use super::{resolve_test_type, session_store, Emitter};
use crate::analysis::{AnalysisRequest, Analyzer};
use crate::config::AppConfig;
use crate::pipeline::exit_codes;
use crate::reports::ReportConfig;
use anyhow::{Context, Result};

/// Per-invocation options for `analyze` that are not part of [`AppConfig`].
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub url: String,
    pub test_type: Option<String>,
    /// Pattern ids to evaluate; empty means all
    pub patterns: Vec<String>,
    /// Include pattern benefits and limitations in the report
    pub details: bool,
    /// Skip saving the report to the session store
    pub no_save: bool,
    pub quiet: bool,
}

/// Run the analyze command, returning the desired exit code.
pub fn run_analyze(config: &AppConfig, options: AnalyzeOptions) -> Result<i32> {
    let analyzer = Analyzer::from_config(config).context("failed to set up the analyzer")?;
    let request = AnalysisRequest::new(options.url.as_str())
        .with_test_type(resolve_test_type(options.test_type.as_deref(), config))
        .with_patterns(options.patterns);

    let report = analyzer
        .analyze(&request)
        .with_context(|| format!("analysis of {} failed", options.url))?;

    if report.fallback_used && !options.quiet {
        tracing::warn!(
            "{} source failed; showing baseline metrics instead",
            analyzer.source_name()
        );
    }

    if !options.no_save {
        if let Some(store) = session_store(config) {
            // A failed save never hides the report itself
            if let Err(e) = store.record(&report) {
                tracing::warn!("Could not save session: {e}");
            }
        }
    }

    let report_config = ReportConfig {
        include_pattern_details: options.details,
        ..ReportConfig::default()
    };
    Emitter::new(&config.output, report_config, options.quiet)
        .emit(|reporter, cfg| reporter.generate_analysis_report(&report, cfg))?;

    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use crate::session::SessionStore;
    use tempfile::TempDir;

    fn config(tmp: &TempDir, out: &str) -> AppConfig {
        AppConfig::builder()
            .seed(7)
            .output_format(ReportFormat::Json)
            .output_file(Some(tmp.path().join(out)))
            .session_dir(tmp.path().join("session"))
            .build()
    }

    #[test]
    fn test_run_analyze_writes_report_and_session() {
        let tmp = TempDir::new().unwrap();
        let config = config(&tmp, "report.json");
        let options = AnalyzeOptions {
            url: "https://api.example.com".to_string(),
            test_type: Some("api".to_string()),
            quiet: true,
            ..AnalyzeOptions::default()
        };

        let code = run_analyze(&config, options).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let json = std::fs::read_to_string(tmp.path().join("report.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["testType"], "api");

        let store = SessionStore::new(tmp.path().join("session"));
        assert!(store.latest().is_some());
        assert!(store.viewed().is_some());
    }

    #[test]
    fn test_run_analyze_no_save() {
        let tmp = TempDir::new().unwrap();
        let config = config(&tmp, "report.json");
        let options = AnalyzeOptions {
            url: "https://example.com".to_string(),
            no_save: true,
            quiet: true,
            ..AnalyzeOptions::default()
        };

        run_analyze(&config, options).unwrap();
        assert!(SessionStore::new(tmp.path().join("session")).latest().is_none());
    }

    #[test]
    fn test_run_analyze_rejects_bad_url() {
        let tmp = TempDir::new().unwrap();
        let options = AnalyzeOptions {
            url: "ftp://example.com".to_string(),
            quiet: true,
            ..AnalyzeOptions::default()
        };
        assert!(run_analyze(&config(&tmp, "r.json"), options).is_err());
    }
}
