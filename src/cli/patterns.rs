//! Catalog listing handlers for `patterns` and `metrics`.

use crate::model::{MetricCatalog, MetricKey, PatternCatalog};
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::fmt::Write as _;

/// List the pattern catalog, or one pattern in detail.
pub fn run_patterns(id: Option<&str>, format: ReportFormat) -> Result<i32> {
    let catalog = PatternCatalog::builtin();
    let patterns = match id {
        Some(id) => vec![catalog.resolve(id)?],
        None => catalog.iter().collect(),
    };

    let content = if format == ReportFormat::Json {
        serde_json::to_string_pretty(&patterns).context("failed to serialize patterns")?
    } else {
        let mut out = String::new();
        for pattern in &patterns {
            let _ = writeln!(out, "{:<14} {}", pattern.id, pattern.name);
            if id.is_some() {
                let _ = writeln!(out, "\n{}\n", pattern.description);
                let _ = writeln!(out, "Benefits:");
                for b in &pattern.benefits {
                    let _ = writeln!(out, "  + {b}");
                }
                let _ = writeln!(out, "Limitations:");
                for l in &pattern.limitations {
                    let _ = writeln!(out, "  - {l}");
                }
            }
        }
        out
    };

    write_output(&content, &OutputTarget::Stdout, true)?;
    Ok(exit_codes::SUCCESS)
}

/// List the eight metrics with units and direction.
pub fn run_metrics(format: ReportFormat) -> Result<i32> {
    let content = if format == ReportFormat::Json {
        serde_json::to_string_pretty(MetricCatalog::definitions())
            .context("failed to serialize metric catalog")?
    } else {
        let mut out = String::new();
        let _ = writeln!(out, "{:<21} {:<24} {:<8} Better", "Key", "Name", "Unit");
        for key in MetricKey::ALL {
            let _ = writeln!(
                out,
                "{:<21} {:<24} {:<8} {}",
                key.as_str(),
                key.name(),
                key.unit(),
                if key.is_lower_better() { "lower" } else { "higher" }
            );
        }
        out
    };

    write_output(&content, &OutputTarget::Stdout, true)?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_patterns_unknown_id() {
        let err = run_patterns(Some("microservice"), ReportFormat::Summary).unwrap_err();
        assert!(err.to_string().contains("did you mean"));
    }

    #[test]
    fn test_run_patterns_and_metrics_succeed() {
        assert_eq!(run_patterns(None, ReportFormat::Summary).unwrap(), 0);
        assert_eq!(run_patterns(Some("p2p"), ReportFormat::Json).unwrap(), 0);
        assert_eq!(run_metrics(ReportFormat::Table).unwrap(), 0);
    }
}
