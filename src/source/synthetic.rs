//! Seeded synthetic metric generation.

use super::{MetricSource, SourceOutput, SourceRequest};
use crate::error::Result;
use crate::model::{ids, CandidateMetrics, MetricKey, MetricsData};
use crate::utils::derive_seed;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Relative noise applied to every base value (plus or minus 10%)
const NOISE: f64 = 0.1;

/// Typical metrics for a built-in pattern, before noise.
#[must_use]
pub fn base_metrics(pattern_id: &str) -> Option<MetricsData> {
    #[allow(clippy::type_complexity)]
    let row: (f64, f64, f64, f64, f64, f64, f64, f64) = match pattern_id {
        ids::MONOLITHIC => (1200.0, 240.0, 98.5, 85.0, 5.0, 3.0, 7.0, 9.0),
        ids::MICROSERVICES => (2800.0, 180.0, 99.8, 65.0, 8.0, 9.0, 6.0, 7.0),
        ids::SERVERLESS => (3500.0, 150.0, 99.9, 45.0, 9.0, 10.0, 9.0, 6.0),
        ids::EVENT_DRIVEN => (4200.0, 120.0, 99.7, 60.0, 8.0, 8.0, 7.0, 6.0),
        ids::PEER_TO_PEER => (1800.0, 300.0, 97.5, 70.0, 9.0, 7.0, 8.0, 5.0),
        ids::SERVICE_ORIENTED => (2200.0, 200.0, 99.0, 75.0, 7.0, 6.0, 6.0, 8.0),
        _ => return None,
    };
    Some(MetricsData {
        throughput: row.0,
        latency: row.1,
        availability: row.2,
        resource_utilization: row.3,
        fault_tolerance: row.4,
        elasticity: row.5,
        cost_efficiency: row.6,
        data_consistency: row.7,
    })
}

/// Generates metrics around each pattern's base values with seeded noise.
///
/// The same seed always yields the same metrics for a pattern, independent
/// of which other patterns are requested alongside it.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    seed: u64,
}

impl SyntheticSource {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Source with a seed drawn from the thread-local RNG
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Noisy metrics for one pattern, or `None` for a pattern without base values
    #[must_use]
    pub fn generate(&self, pattern_id: &str) -> Option<MetricsData> {
        let base = base_metrics(pattern_id)?;
        let mut rng = StdRng::seed_from_u64(derive_seed(self.seed, pattern_id));
        Some(MetricsData::from_fn(|key| {
            let factor = rng.random_range((1.0 - NOISE)..(1.0 + NOISE));
            shape(key, base.get(key) * factor)
        }))
    }
}

/// Round and clamp a raw value into its metric's domain.
fn shape(key: MetricKey, raw: f64) -> f64 {
    let (min, max) = key.kind().bounds();
    let rounded = if key == MetricKey::Availability {
        (raw * 10.0).round() / 10.0
    } else {
        raw.round()
    };
    rounded.clamp(min, max)
}

impl MetricSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn fetch(&self, request: &SourceRequest<'_>) -> Result<SourceOutput> {
        let mut output = SourceOutput::default();
        for pattern in request.patterns {
            match self.generate(&pattern.id) {
                Some(metrics) => {
                    output
                        .metrics
                        .insert(pattern.id.clone(), CandidateMetrics::from(metrics));
                }
                None => {
                    tracing::debug!(pattern = %pattern.id, "No base values for pattern");
                }
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PatternCatalog;
    use crate::scoring::TestContext;

    #[test]
    fn test_same_seed_same_metrics() {
        let a = SyntheticSource::new(42).generate("serverless").unwrap();
        let b = SyntheticSource::new(42).generate("serverless").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_values_stay_within_noise_band() {
        for seed in 0..50 {
            let m = SyntheticSource::new(seed).generate("eventdriven").unwrap();
            assert!(m.validate().is_ok(), "seed {seed}: {m:?}");
            assert!((3780.0..=4620.0).contains(&m.throughput), "{}", m.throughput);
            assert!(m.availability <= 100.0);
            assert!(m.elasticity <= 10.0 && m.elasticity >= 1.0);
            assert_eq!(m.latency.fract(), 0.0);
        }
    }

    #[test]
    fn test_unknown_pattern_has_no_metrics() {
        assert!(base_metrics("blockchain").is_none());
        assert!(SyntheticSource::new(1).generate("blockchain").is_none());
    }

    #[test]
    fn test_fetch_covers_requested_patterns() {
        let patterns: Vec<_> = PatternCatalog::builtin().iter().take(3).cloned().collect();
        let request = SourceRequest {
            url: "https://example.com",
            context: &TestContext::General,
            patterns: &patterns,
        };
        let output = SyntheticSource::new(9).fetch(&request).unwrap();
        assert_eq!(output.metrics.len(), 3);
        assert!(!output.fallback_used);
        assert!(output.metrics.contains_key("monolithic"));
    }

    #[test]
    fn test_pattern_values_independent_of_selection() {
        let source = SyntheticSource::new(5);
        let all: Vec<_> = PatternCatalog::builtin().iter().cloned().collect();
        let one = vec![PatternCatalog::builtin().get("soa").unwrap().clone()];
        let ctx = TestContext::General;
        let full = source
            .fetch(&SourceRequest { url: "https://a.io", context: &ctx, patterns: &all })
            .unwrap();
        let single = source
            .fetch(&SourceRequest { url: "https://a.io", context: &ctx, patterns: &one })
            .unwrap();
        assert_eq!(full.metrics["soa"], single.metrics["soa"]);
    }
}
