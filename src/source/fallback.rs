//! Explicit fallback to baseline metrics.

use super::{base_metrics, MetricSource, SourceOutput, SourceRequest};
use crate::error::Result;
use crate::model::CandidateMetrics;
use tracing::warn;

/// Baseline values, without noise, for every requested pattern that has them.
#[must_use]
pub fn default_output(request: &SourceRequest<'_>) -> SourceOutput {
    let metrics = request
        .patterns
        .iter()
        .filter_map(|p| base_metrics(&p.id).map(|m| (p.id.clone(), CandidateMetrics::from(m))))
        .collect();
    SourceOutput {
        metrics,
        rationale: None,
        suggested_pattern: None,
        fallback_used: true,
    }
}

/// Wraps a primary source and substitutes [`default_output`] when it fails.
///
/// The substitution is always logged and flagged through
/// [`SourceOutput::fallback_used`].
pub struct FallbackSource<S> {
    primary: S,
}

impl<S: MetricSource> FallbackSource<S> {
    pub const fn new(primary: S) -> Self {
        Self { primary }
    }

    pub fn into_inner(self) -> S {
        self.primary
    }
}

impl<S: MetricSource> MetricSource for FallbackSource<S> {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    fn fetch(&self, request: &SourceRequest<'_>) -> Result<SourceOutput> {
        match self.primary.fetch(request) {
            Ok(output) => Ok(output),
            Err(e) => {
                warn!(
                    source = self.primary.name(),
                    error = %e,
                    "Metric source failed, using default metrics"
                );
                Ok(default_output(request))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArchScaleError, SourceErrorKind};
    use crate::model::PatternCatalog;
    use crate::scoring::TestContext;

    struct Offline;

    impl MetricSource for Offline {
        fn name(&self) -> &'static str {
            "offline"
        }

        fn fetch(&self, _request: &SourceRequest<'_>) -> Result<SourceOutput> {
            Err(ArchScaleError::source(
                "test",
                SourceErrorKind::ApiError("503 service unavailable".to_string()),
            ))
        }
    }

    #[test]
    fn test_fallback_substitutes_base_values() {
        let patterns: Vec<_> = PatternCatalog::builtin().iter().cloned().collect();
        let request = SourceRequest {
            url: "https://example.com",
            context: &TestContext::General,
            patterns: &patterns,
        };
        let output = FallbackSource::new(Offline).fetch(&request).unwrap();
        assert!(output.fallback_used);
        assert_eq!(output.metrics.len(), 6);
        assert_eq!(output.metrics["serverless"].throughput, Some(3500.0));
    }

    #[test]
    fn test_fallback_keeps_primary_name() {
        assert_eq!(FallbackSource::new(Offline).name(), "offline");
    }
}
