//! Metric sources.
//!
//! A [`MetricSource`] supplies candidate metrics for the patterns under
//! analysis. The scoring engine never talks to a source directly; the
//! analyzer resolves every value first and hands the engine a complete
//! snapshot.
//!
//! - [`SyntheticSource`]: seeded pseudo-random values around per-pattern baselines
//! - `RemoteSource` (feature `remote`): an OpenAI-compatible chat-completions API
//! - [`FallbackSource`]: wraps another source and substitutes baseline values on failure

mod fallback;
#[cfg(feature = "remote")]
mod remote;
mod remote_schema;
mod synthetic;

pub use fallback::{default_output, FallbackSource};
#[cfg(feature = "remote")]
pub use remote::RemoteSource;
pub use remote_schema::{parse_analysis_content, RemoteAnalysis};
pub use synthetic::{base_metrics, SyntheticSource};

use crate::config::SourceConfig;
use crate::error::Result;
use crate::model::{ArchitecturePattern, CandidateMetrics, MetricsData};
use crate::scoring::TestContext;
use clap::ValueEnum;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything a source needs to produce metrics.
#[derive(Debug, Clone, Copy)]
pub struct SourceRequest<'a> {
    pub url: &'a str,
    pub context: &'a TestContext,
    pub patterns: &'a [ArchitecturePattern],
}

/// Metrics and commentary returned by a source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceOutput {
    /// Candidate metrics per pattern id; a pattern may be absent
    pub metrics: IndexMap<String, CandidateMetrics>,
    /// Free-text explanation supplied by the source
    pub rationale: Option<String>,
    /// The source's own pick; informational only, the engine decides
    pub suggested_pattern: Option<String>,
    /// Set when the primary source failed and baseline values were used
    pub fallback_used: bool,
}

impl SourceOutput {
    /// Metrics for `pattern_id`, or an empty candidate if none were supplied
    #[must_use]
    pub fn candidate_for(&self, pattern_id: &str) -> CandidateMetrics {
        self.metrics.get(pattern_id).copied().unwrap_or_default()
    }
}

/// A provider of candidate metrics.
///
/// Implementations must be deterministic for a given configuration except
/// where they call out to an external service.
pub trait MetricSource: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Produce metrics for every pattern in the request.
    fn fetch(&self, request: &SourceRequest<'_>) -> Result<SourceOutput>;
}

impl<S: MetricSource + ?Sized> MetricSource for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn fetch(&self, request: &SourceRequest<'_>) -> Result<SourceOutput> {
        (**self).fetch(request)
    }
}

/// Which source to pull metrics from.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Seeded pseudo-random values
    #[default]
    Synthetic,
    /// Remote chat-completions API
    Remote,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synthetic => write!(f, "synthetic"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// The "before scaling" reference snapshot used for comparisons.
#[must_use]
pub const fn baseline_snapshot() -> MetricsData {
    MetricsData {
        throughput: 800.0,
        latency: 350.0,
        availability: 97.2,
        resource_utilization: 92.0,
        fault_tolerance: 4.0,
        elasticity: 3.0,
        cost_efficiency: 5.0,
        data_consistency: 8.0,
    }
}

/// Build the source described by `config`.
pub fn build_source(config: &SourceConfig) -> Result<Box<dyn MetricSource>> {
    match config.kind {
        SourceKind::Synthetic => {
            let source = match config.seed {
                Some(seed) => SyntheticSource::new(seed),
                None => SyntheticSource::from_entropy(),
            };
            tracing::debug!(seed = source.seed(), "Using synthetic metric source");
            Ok(Box::new(source))
        }
        SourceKind::Remote => build_remote(config),
    }
}

#[cfg(feature = "remote")]
fn build_remote(config: &SourceConfig) -> Result<Box<dyn MetricSource>> {
    let remote = RemoteSource::new(&config.remote)?;
    if config.fallback {
        Ok(Box::new(FallbackSource::new(remote)))
    } else {
        Ok(Box::new(remote))
    }
}

#[cfg(not(feature = "remote"))]
fn build_remote(_config: &SourceConfig) -> Result<Box<dyn MetricSource>> {
    Err(crate::error::ArchScaleError::config(
        "the remote metric source requires the `remote` feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_snapshot_is_valid() {
        assert!(baseline_snapshot().validate().is_ok());
    }

    #[test]
    fn test_build_seeded_synthetic_source() {
        let config = SourceConfig {
            seed: Some(7),
            ..SourceConfig::default()
        };
        let source = build_source(&config).unwrap();
        assert_eq!(source.name(), "synthetic");
    }

    #[test]
    fn test_candidate_for_unknown_pattern_is_empty() {
        let output = SourceOutput::default();
        assert!(output.candidate_for("soa").first_missing().is_some());
    }
}
