//! Per-pattern snapshots and before/after comparisons.

use super::{ArchitecturePattern, MetricKey, MetricsData};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One pattern together with the metrics observed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMetrics {
    pub pattern: ArchitecturePattern,
    pub metrics: MetricsData,
}

/// Sign-corrected improvement percentage per metric, in catalog order.
///
/// A positive value is always an improvement, including for latency and
/// resource utilization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImprovementPercentages(IndexMap<MetricKey, f64>);

impl ImprovementPercentages {
    pub(crate) fn insert(&mut self, key: MetricKey, pct: f64) {
        self.0.insert(key, pct);
    }

    #[must_use]
    pub fn get(&self, key: MetricKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Metrics whose change counts as a gain
    pub fn favorable(&self) -> impl Iterator<Item = MetricKey> + '_ {
        self.iter()
            .filter(|(key, pct)| key.is_favorable(*pct))
            .map(|(key, _)| key)
    }
}

/// A before snapshot, an after snapshot and the deltas between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub before_scaling: MetricsData,
    pub after_scaling: MetricsData,
    /// Pattern the after snapshot was taken with
    pub pattern_used: String,
    pub improvement_percentages: ImprovementPercentages,
}
