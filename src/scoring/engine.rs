//! Pattern scoring engine.
//!
//! Scores complete metric snapshots with a fixed weighted sum, applies the
//! test-context adjustment and ranks candidates by descending score. The
//! engine is pure: the same input always yields the same ranking.

use crate::error::{ArchScaleError, Result};
use crate::model::{
    ArchitecturePattern, CandidateMetrics, MetricKey, MetricsData, PatternMetrics,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::context::TestContext;

/// Coefficients of the scoring formula.
///
/// ```text
/// score = throughput_weight * (throughput / 1000)
///       + (latency_ceiling - latency) / latency_divisor
///       + (availability - availability_floor)
///       + (100 - resourceUtilization) / utilization_divisor
///       + scale_weight * (faultTolerance + elasticity + costEfficiency + dataConsistency)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringWeights {
    /// Multiplier for throughput in thousands of requests per second
    pub throughput_weight: f64,
    /// Latency (ms) at which the latency term is zero
    pub latency_ceiling: f64,
    pub latency_divisor: f64,
    /// Availability (%) at which the availability term is zero
    pub availability_floor: f64,
    pub utilization_divisor: f64,
    /// Multiplier for the four 1-10 scale metrics
    pub scale_weight: f64,
    /// `api` context bonus is throughput divided by this
    pub api_throughput_divisor: f64,
    /// `database` context bonus is data consistency times this
    pub database_consistency_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            throughput_weight: 2.0,
            latency_ceiling: 500.0,
            latency_divisor: 100.0,
            availability_floor: 95.0,
            utilization_divisor: 10.0,
            scale_weight: 1.0,
            api_throughput_divisor: 500.0,
            database_consistency_weight: 1.5,
        }
    }
}

/// A pattern offered for ranking, with possibly incomplete metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub pattern: ArchitecturePattern,
    pub metrics: CandidateMetrics,
}

impl Candidate {
    #[must_use]
    pub fn new(pattern: ArchitecturePattern, metrics: impl Into<CandidateMetrics>) -> Self {
        Self {
            pattern,
            metrics: metrics.into(),
        }
    }
}

/// A scored candidate at its position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPattern {
    /// 1-based position
    pub rank: usize,
    pub score: f64,
    pub pattern: ArchitecturePattern,
    pub metrics: MetricsData,
}

/// A candidate excluded from the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedCandidate {
    pub pattern_id: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_metric: Option<MetricKey>,
}

/// Result of ranking a candidate set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct Ranking {
    pub context: TestContext,
    /// Scored candidates, best first
    pub ranked: Vec<RankedPattern>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedCandidate>,
}

impl Ranking {
    /// The rank-1 pattern
    #[must_use]
    pub fn recommendation(&self) -> Option<&RankedPattern> {
        self.ranked.first()
    }

    /// Scored snapshots in rank order
    #[must_use]
    pub fn pattern_metrics(&self) -> Vec<PatternMetrics> {
        self.ranked
            .iter()
            .map(|r| PatternMetrics {
                pattern: r.pattern.clone(),
                metrics: r.metrics,
            })
            .collect()
    }

    #[must_use]
    pub fn score_of(&self, pattern_id: &str) -> Option<f64> {
        self.ranked
            .iter()
            .find(|r| r.pattern.id == pattern_id)
            .map(|r| r.score)
    }
}

/// Weighted-sum scorer and ranker.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl ScoringEngine {
    #[must_use]
    pub const fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a complete snapshot.
    ///
    /// The snapshot is validated first, so a non-finite or out-of-range
    /// value is an `InvalidInput` error rather than a NaN score.
    pub fn score(&self, metrics: &MetricsData, context: &TestContext) -> Result<f64> {
        metrics.validate()?;
        Ok(self.raw_score(metrics, context))
    }

    /// Score a single candidate, failing with `MissingMetric` if any
    /// field is absent.
    pub fn score_one(&self, candidate: &Candidate, context: &TestContext) -> Result<f64> {
        let metrics = candidate.metrics.complete(&candidate.pattern.id)?;
        Ok(self.raw_score(&metrics, context))
    }

    fn raw_score(&self, m: &MetricsData, context: &TestContext) -> f64 {
        let w = &self.weights;
        let base = w.throughput_weight * (m.throughput / 1000.0)
            + (w.latency_ceiling - m.latency) / w.latency_divisor
            + (m.availability - w.availability_floor)
            + (100.0 - m.resource_utilization) / w.utilization_divisor
            + w.scale_weight
                * (m.fault_tolerance + m.elasticity + m.cost_efficiency + m.data_consistency);

        base + self.context_adjustment(m, context)
    }

    /// Bonus added for the given context
    #[must_use]
    pub fn context_adjustment(&self, m: &MetricsData, context: &TestContext) -> f64 {
        match context {
            TestContext::Api => m.throughput / self.weights.api_throughput_divisor,
            TestContext::Database => m.data_consistency * self.weights.database_consistency_weight,
            TestContext::General | TestContext::Other(_) => 0.0,
        }
    }

    /// Rank candidates by descending score.
    ///
    /// Candidates with a missing metric are excluded and listed in
    /// [`Ranking::rejected`]. Any other invalid value fails the whole call.
    /// Ties keep their input order.
    pub fn rank(&self, candidates: &[Candidate], context: &TestContext) -> Result<Ranking> {
        if candidates.is_empty() {
            return Err(ArchScaleError::invalid_input("candidate set is empty"));
        }

        let mut scored = Vec::with_capacity(candidates.len());
        let mut rejected = Vec::new();

        for candidate in candidates {
            let metrics = match candidate.metrics.complete(&candidate.pattern.id) {
                Ok(metrics) => metrics,
                Err(ArchScaleError::MissingMetric { pattern, metric }) => {
                    warn!(
                        pattern = %pattern,
                        metric = %metric,
                        "Excluding candidate with missing metric"
                    );
                    rejected.push(RejectedCandidate {
                        reason: format!("missing required metric '{metric}'"),
                        pattern_id: pattern,
                        missing_metric: Some(metric),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };
            let score = self.raw_score(&metrics, context);
            debug!(pattern = %candidate.pattern.id, score, "Scored candidate");
            scored.push((score, candidate.pattern.clone(), metrics));
        }

        if scored.is_empty() {
            return Err(ArchScaleError::invalid_input(format!(
                "all {} candidates were rejected for missing metrics",
                candidates.len()
            )));
        }

        // sort_by is stable, so equal scores keep input order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let ranked = scored
            .into_iter()
            .enumerate()
            .map(|(i, (score, pattern, metrics))| RankedPattern {
                rank: i + 1,
                score,
                pattern,
                metrics,
            })
            .collect();

        Ok(Ranking {
            context: context.clone(),
            ranked,
            rejected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PatternCatalog;

    fn microservices() -> MetricsData {
        MetricsData {
            throughput: 2800.0,
            latency: 180.0,
            availability: 99.8,
            resource_utilization: 65.0,
            fault_tolerance: 8.0,
            elasticity: 9.0,
            cost_efficiency: 6.0,
            data_consistency: 7.0,
        }
    }

    fn candidate(id: &str, metrics: MetricsData) -> Candidate {
        let pattern = PatternCatalog::builtin().get(id).unwrap().clone();
        Candidate::new(pattern, metrics)
    }

    #[test]
    fn test_score_matches_formula() {
        let engine = ScoringEngine::default();
        let score = engine
            .score(&microservices(), &TestContext::General)
            .unwrap();
        // 5.6 + 3.2 + 4.8 + 3.5 + 30
        assert!((score - 47.1).abs() < 1e-9, "{score}");
    }

    #[test]
    fn test_api_context_adds_throughput_bonus() {
        let engine = ScoringEngine::default();
        let base = engine.score(&microservices(), &TestContext::General).unwrap();
        let api = engine.score(&microservices(), &TestContext::Api).unwrap();
        assert!((api - base - 2800.0 / 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_database_context_adds_consistency_bonus() {
        let engine = ScoringEngine::default();
        let base = engine.score(&microservices(), &TestContext::General).unwrap();
        let db = engine.score(&microservices(), &TestContext::Database).unwrap();
        assert!((db - base - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_context_has_no_adjustment() {
        let engine = ScoringEngine::default();
        let base = engine.score(&microservices(), &TestContext::General).unwrap();
        let other = engine
            .score(&microservices(), &TestContext::parse("web"))
            .unwrap();
        assert_eq!(base, other);
    }

    #[test]
    fn test_score_rejects_non_finite() {
        let mut m = microservices();
        m.cost_efficiency = f64::NAN;
        let result = ScoringEngine::default().score(&m, &TestContext::General);
        assert!(matches!(result, Err(ArchScaleError::InvalidInput(_))));
    }

    #[test]
    fn test_rank_empty_is_invalid_input() {
        let result = ScoringEngine::default().rank(&[], &TestContext::General);
        assert!(matches!(result, Err(ArchScaleError::InvalidInput(_))));
    }

    #[test]
    fn test_rank_orders_by_score_and_keeps_ties() {
        let mut faster = microservices();
        faster.throughput = 5000.0;
        let candidates = vec![
            candidate("monolithic", microservices()),
            candidate("serverless", faster),
            candidate("soa", microservices()),
        ];
        let ranking = ScoringEngine::default()
            .rank(&candidates, &TestContext::General)
            .unwrap();
        let ids: Vec<_> = ranking.ranked.iter().map(|r| r.pattern.id.as_str()).collect();
        assert_eq!(ids, vec!["serverless", "monolithic", "soa"]);
        assert_eq!(ranking.recommendation().unwrap().rank, 1);
        assert_eq!(ranking.ranked[2].rank, 3);
    }

    #[test]
    fn test_rank_excludes_missing_metric() {
        let incomplete = CandidateMetrics::from(microservices()).without(MetricKey::Latency);
        let candidates = vec![
            Candidate::new(
                PatternCatalog::builtin().get("p2p").unwrap().clone(),
                incomplete,
            ),
            candidate("soa", microservices()),
        ];
        let ranking = ScoringEngine::default()
            .rank(&candidates, &TestContext::General)
            .unwrap();
        assert_eq!(ranking.ranked.len(), 1);
        assert_eq!(ranking.ranked[0].pattern.id, "soa");
        assert_eq!(ranking.rejected.len(), 1);
        assert_eq!(ranking.rejected[0].pattern_id, "p2p");
        assert_eq!(ranking.rejected[0].missing_metric, Some(MetricKey::Latency));
        assert!(ranking.score_of("p2p").is_none());
    }

    #[test]
    fn test_rank_all_rejected_is_invalid_input() {
        let incomplete = CandidateMetrics::from(microservices()).without(MetricKey::Elasticity);
        let candidates = vec![Candidate::new(
            PatternCatalog::builtin().get("soa").unwrap().clone(),
            incomplete,
        )];
        let result = ScoringEngine::default().rank(&candidates, &TestContext::General);
        assert!(matches!(result, Err(ArchScaleError::InvalidInput(_))));
    }

    #[test]
    fn test_score_one_reports_missing_metric() {
        let incomplete =
            CandidateMetrics::from(microservices()).without(MetricKey::DataConsistency);
        let c = Candidate::new(
            PatternCatalog::builtin().get("serverless").unwrap().clone(),
            incomplete,
        );
        let err = ScoringEngine::default()
            .score_one(&c, &TestContext::General)
            .unwrap_err();
        assert!(err.is_missing_metric());
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoringWeights {
            scale_weight: 0.0,
            ..ScoringWeights::default()
        };
        let score = ScoringEngine::new(weights)
            .score(&microservices(), &TestContext::General)
            .unwrap();
        assert!((score - 17.1).abs() < 1e-9, "{score}");
    }
}
