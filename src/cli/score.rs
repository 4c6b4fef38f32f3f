//! Score command handler.
//!
//! Ranks candidate patterns whose metrics come from a JSON file instead of
//! a metric source:
//!
//! ```json
//! [
//!   { "pattern": "microservices", "metrics": { "throughput": 2800, "latency": 180, ... } },
//!   { "pattern": "serverless", "metrics": { ... } }
//! ]
//! ```

use super::{resolve_test_type, Emitter};
use crate::config::AppConfig;
use crate::model::{CandidateMetrics, PatternCatalog};
use crate::pipeline::exit_codes;
use crate::reports::ReportConfig;
use crate::scoring::{Candidate, ScoringEngine};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One candidate in a score input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreEntry {
    /// Catalog pattern id
    pub pattern: String,
    /// Metrics; absent fields reject the candidate
    pub metrics: CandidateMetrics,
}

/// Run the score command, returning the desired exit code.
///
/// Returns [`exit_codes::NO_RESULT`] when every candidate lacks a metric.
pub fn run_score(
    config: &AppConfig,
    input: &Path,
    test_type: Option<&str>,
    quiet: bool,
) -> Result<i32> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let entries: Vec<ScoreEntry> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse candidates from {}", input.display()))?;

    let catalog = PatternCatalog::builtin();
    let candidates = entries
        .into_iter()
        .map(|entry| {
            let pattern = catalog.resolve(&entry.pattern)?;
            Ok(Candidate::new(pattern.clone(), entry.metrics))
        })
        .collect::<crate::error::Result<Vec<_>>>()?;

    if !candidates.is_empty() && candidates.iter().all(|c| c.metrics.first_missing().is_some()) {
        tracing::warn!("Every candidate is missing at least one metric; nothing to rank");
        return Ok(exit_codes::NO_RESULT);
    }

    let context = resolve_test_type(test_type, config);
    let ranking = ScoringEngine::new(config.scoring.weights.clone())
        .rank(&candidates, &context)
        .context("ranking failed")?;

    let report_config = ReportConfig::with_title(format!("Pattern ranking ({context})"));
    Emitter::new(&config.output, report_config, quiet)
        .emit(|reporter, cfg| reporter.generate_ranking_report(&ranking, cfg))?;

    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    const FULL: &str = r#"{"throughput": 2800, "latency": 180, "availability": 99.8,
        "resourceUtilization": 65, "faultTolerance": 8, "elasticity": 9,
        "costEfficiency": 6, "dataConsistency": 7}"#;

    fn run(tmp: &TempDir, json: &str) -> Result<i32> {
        let input = tmp.path().join("candidates.json");
        std::fs::write(&input, json).unwrap();
        let config = AppConfig::builder()
            .output_format(ReportFormat::Csv)
            .output_file(Some(tmp.path().join("ranking.csv")))
            .build();
        run_score(&config, &input, Some("api"), true)
    }

    #[test]
    fn test_run_score_ranks_file() {
        let tmp = TempDir::new().unwrap();
        let json = format!(
            r#"[{{"pattern": "microservices", "metrics": {FULL}}},
                {{"pattern": "soa", "metrics": {{"throughput": 100}}}}]"#
        );
        assert_eq!(run(&tmp, &json).unwrap(), exit_codes::SUCCESS);

        let csv = std::fs::read_to_string(tmp.path().join("ranking.csv")).unwrap();
        assert!(csv.contains("microservices"));
    }

    #[test]
    fn test_run_score_all_rejected() {
        let tmp = TempDir::new().unwrap();
        let json = r#"[{"pattern": "p2p", "metrics": {"latency": 10}}]"#;
        assert_eq!(run(&tmp, json).unwrap(), exit_codes::NO_RESULT);
    }

    #[test]
    fn test_run_score_empty_set_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(run(&tmp, "[]").is_err());
    }

    #[test]
    fn test_run_score_unknown_pattern() {
        let tmp = TempDir::new().unwrap();
        let json = format!(r#"[{{"pattern": "mainframe", "metrics": {FULL}}}]"#);
        assert!(run(&tmp, &json).is_err());
    }
}
