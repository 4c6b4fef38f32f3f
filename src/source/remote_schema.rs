//! Strict schema for analysis replies from the remote source.
//!
//! The reply content must be a single JSON object with exactly these
//! fields. Free-form text, extra fields or wrong types are rejected as
//! `InvalidResponse`; nothing is scraped out of prose.

use super::SourceOutput;
use crate::error::{ArchScaleError, Result, SourceErrorKind};
use crate::model::{ArchitecturePattern, CandidateMetrics};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parsed analysis reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RemoteAnalysis {
    pub best_pattern_id: String,
    pub reasoning: String,
    /// Metrics for the best pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_metrics: Option<CandidateMetrics>,
    /// Metrics per pattern id
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub patterns: IndexMap<String, CandidateMetrics>,
}

fn invalid(message: impl Into<String>) -> ArchScaleError {
    ArchScaleError::source(
        "parsing analysis reply",
        SourceErrorKind::InvalidResponse(message.into()),
    )
}

/// Parse reply content against the strict schema.
pub fn parse_analysis_content(content: &str) -> Result<RemoteAnalysis> {
    let analysis: RemoteAnalysis =
        serde_json::from_str(content.trim()).map_err(|e| invalid(e.to_string()))?;
    if analysis.performance_metrics.is_none() && analysis.patterns.is_empty() {
        return Err(invalid("reply carries no metrics"));
    }
    Ok(analysis)
}

impl RemoteAnalysis {
    /// Convert into source output, checking that every pattern id named
    /// in the reply was part of the request and that every value given is
    /// within its metric bounds.
    pub fn into_output(self, requested: &[ArchitecturePattern]) -> Result<SourceOutput> {
        let known = |id: &str| requested.iter().any(|p| p.id == id);
        let unknown = |id: &str| {
            ArchScaleError::source(
                "validating analysis reply",
                SourceErrorKind::UnknownPattern(id.to_string()),
            )
        };

        if !known(&self.best_pattern_id) {
            return Err(unknown(&self.best_pattern_id));
        }
        if let Some(id) = self.patterns.keys().find(|id| !known(id)) {
            return Err(unknown(id));
        }

        let mut metrics = self.patterns;
        if let Some(best) = self.performance_metrics {
            metrics.entry(self.best_pattern_id.clone()).or_insert(best);
        }
        for (id, candidate) in &metrics {
            candidate
                .validate_present()
                .map_err(|e| invalid(format!("pattern '{id}': {e}")))?;
        }

        Ok(SourceOutput {
            metrics,
            rationale: Some(self.reasoning),
            suggested_pattern: Some(self.best_pattern_id),
            fallback_used: false,
        })
    }
}
