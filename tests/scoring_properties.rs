//! Property-based tests for the scoring engine.
//!
//! Checks monotonicity of the score in every metric, ranking stability and
//! the exact size of the context adjustments across random snapshots.

use archscale::model::{MetricKey, MetricsData, PatternCatalog};
use archscale::scoring::{Candidate, ScoringEngine, TestContext};
use proptest::prelude::*;

fn snapshot() -> impl Strategy<Value = MetricsData> {
    (
        (100.0..10_000.0f64, 1.0..1_000.0f64, 90.0..99.0f64, 1.0..95.0f64),
        (1.0..9.0f64, 1.0..9.0f64, 1.0..9.0f64, 1.0..9.0f64),
    )
        .prop_map(|((tp, lat, av, ru), (ft, el, ce, dc))| MetricsData {
            throughput: tp,
            latency: lat,
            availability: av,
            resource_utilization: ru,
            fault_tolerance: ft,
            elasticity: el,
            cost_efficiency: ce,
            data_consistency: dc,
        })
}

fn context() -> impl Strategy<Value = TestContext> {
    prop_oneof![
        Just(TestContext::General),
        Just(TestContext::Api),
        Just(TestContext::Database),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn score_is_monotonic_in_each_metric(m in snapshot(), ctx in context(), bump in 0.1..0.9f64) {
        let engine = ScoringEngine::default();
        let base = engine.score(&m, &ctx).unwrap();

        for key in MetricKey::ALL {
            let mut changed = m;
            changed.set(key, m.get(key) + bump);
            let score = engine.score(&changed, &ctx).unwrap();
            if key.is_lower_better() {
                prop_assert!(score < base, "{key} raised the score");
            } else {
                prop_assert!(score > base, "{key} did not raise the score");
            }
        }
    }

    #[test]
    fn api_adds_exactly_throughput_over_500(m in snapshot()) {
        let engine = ScoringEngine::default();
        let general = engine.score(&m, &TestContext::General).unwrap();
        let api = engine.score(&m, &TestContext::Api).unwrap();
        prop_assert!(api > general);
        prop_assert!((api - general - m.throughput / 500.0).abs() < 1e-9);
    }

    #[test]
    fn database_adds_consistency_times_one_and_a_half(m in snapshot()) {
        let engine = ScoringEngine::default();
        let general = engine.score(&m, &TestContext::General).unwrap();
        let db = engine.score(&m, &TestContext::Database).unwrap();
        prop_assert!((db - general - m.data_consistency * 1.5).abs() < 1e-9);
    }

    #[test]
    fn ranking_is_stable_and_descending(
        snapshots in prop::collection::vec(snapshot(), 1..6),
        ctx in context(),
    ) {
        let patterns: Vec<_> = PatternCatalog::builtin().iter().cloned().collect();
        let candidates: Vec<Candidate> = snapshots
            .iter()
            .zip(patterns)
            .map(|(m, p)| Candidate::new(p, *m))
            .collect();
        let engine = ScoringEngine::default();

        let first = engine.rank(&candidates, &ctx).unwrap();
        let second = engine.rank(&candidates, &ctx).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.ranked.len(), candidates.len());
        for pair in first.ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
