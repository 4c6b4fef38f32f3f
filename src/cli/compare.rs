//! Compare command handler.
//!
//! Computes improvement percentages between two metric snapshot files.

use super::Emitter;
use crate::config::AppConfig;
use crate::model::{MetricsData, PatternCatalog};
use crate::pipeline::exit_codes;
use crate::reports::ReportConfig;
use crate::scoring::compare;
use anyhow::{Context, Result};
use std::path::Path;

fn load_snapshot(path: &Path) -> Result<MetricsData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a complete metrics snapshot", path.display()))
}

/// Run the compare command, returning the desired exit code.
pub fn run_compare(
    config: &AppConfig,
    before: &Path,
    after: &Path,
    pattern: Option<&str>,
    quiet: bool,
) -> Result<i32> {
    let before = load_snapshot(before)?;
    let after = load_snapshot(after)?;
    let pattern_used = match pattern {
        Some(id) => PatternCatalog::builtin().resolve(id)?.id.clone(),
        None => String::new(),
    };

    let comparison = compare(&before, &after, pattern_used).context("comparison failed")?;

    let report_config = ReportConfig::with_title("Scaling comparison");
    Emitter::new(&config.output, report_config, quiet)
        .emit(|reporter, cfg| reporter.generate_comparison_report(&comparison, cfg))?;

    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_run_compare_json() {
        let tmp = TempDir::new().unwrap();
        let before = tmp.path().join("before.json");
        let after = tmp.path().join("after.json");
        std::fs::write(
            &before,
            r#"{"throughput": 800, "latency": 350, "availability": 97.2,
                "resourceUtilization": 92, "faultTolerance": 4, "elasticity": 3,
                "costEfficiency": 5, "dataConsistency": 8}"#,
        )
        .unwrap();
        std::fs::write(
            &after,
            r#"{"throughput": 2800, "latency": 180, "availability": 99.8,
                "resourceUtilization": 65, "faultTolerance": 8, "elasticity": 9,
                "costEfficiency": 6, "dataConsistency": 7}"#,
        )
        .unwrap();
        let out = tmp.path().join("cmp.json");
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .build();

        let code = run_compare(&config, &before, &after, Some("Microservices"), true).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["patternUsed"], "microservices");
        let throughput = value["improvementPercentages"]["throughput"].as_f64().unwrap();
        assert!((throughput - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_compare_incomplete_snapshot() {
        let tmp = TempDir::new().unwrap();
        let before = tmp.path().join("before.json");
        std::fs::write(&before, r#"{"throughput": 800}"#).unwrap();
        let config = AppConfig::default();
        assert!(run_compare(&config, &before, &before, None, true).is_err());
    }
}
