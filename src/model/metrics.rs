//! Metric catalog and metric snapshots.
//!
//! Eight performance metrics describe every pattern. Each has a unit, a
//! "better direction" and value bounds, all available through [`MetricKey`].

use crate::error::{ArchScaleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one of the eight performance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    Throughput,
    Latency,
    Availability,
    ResourceUtilization,
    FaultTolerance,
    Elasticity,
    CostEfficiency,
    DataConsistency,
}

/// Which direction of change counts as an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// Value domain of a metric, which determines its bounds and display precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// Requests per second
    Rate,
    /// Milliseconds
    Duration,
    /// 0-100
    Percentage,
    /// 1-10
    Scale,
}

impl MetricKind {
    /// Inclusive lower and upper bound of valid values
    #[must_use]
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::Rate | Self::Duration => (0.0, f64::MAX),
            Self::Percentage => (0.0, 100.0),
            Self::Scale => (1.0, 10.0),
        }
    }
}

/// Static description of a metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricDefinition {
    pub key: MetricKey,
    pub name: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
    pub kind: MetricKind,
    pub direction: MetricDirection,
}

static METRIC_DEFINITIONS: [MetricDefinition; 8] = [
    MetricDefinition {
        key: MetricKey::Throughput,
        name: "Throughput",
        description: "The number of requests an application can handle per second, indicating its processing capacity.",
        unit: "requests/sec",
        kind: MetricKind::Rate,
        direction: MetricDirection::HigherIsBetter,
    },
    MetricDefinition {
        key: MetricKey::Latency,
        name: "Latency",
        description: "The time taken for a request to be processed and response to be returned, measuring response speed.",
        unit: "ms",
        kind: MetricKind::Duration,
        direction: MetricDirection::LowerIsBetter,
    },
    MetricDefinition {
        key: MetricKey::Availability,
        name: "Availability",
        description: "The percentage of time an application is operational and accessible to users.",
        unit: "%",
        kind: MetricKind::Percentage,
        direction: MetricDirection::HigherIsBetter,
    },
    MetricDefinition {
        key: MetricKey::ResourceUtilization,
        name: "Resource Utilization",
        description: "The percentage of CPU, memory, and other system resources used by the application.",
        unit: "%",
        kind: MetricKind::Percentage,
        direction: MetricDirection::LowerIsBetter,
    },
    MetricDefinition {
        key: MetricKey::FaultTolerance,
        name: "Fault Tolerance",
        description: "The ability of an application to continue functioning in the presence of component failures.",
        unit: "scale 1-10",
        kind: MetricKind::Scale,
        direction: MetricDirection::HigherIsBetter,
    },
    MetricDefinition {
        key: MetricKey::Elasticity,
        name: "Elasticity",
        description: "How well an application can adapt to workload changes by adding or removing resources automatically.",
        unit: "scale 1-10",
        kind: MetricKind::Scale,
        direction: MetricDirection::HigherIsBetter,
    },
    MetricDefinition {
        key: MetricKey::CostEfficiency,
        name: "Cost Efficiency",
        description: "The balance between performance and the resources (and therefore costs) required to achieve it.",
        unit: "scale 1-10",
        kind: MetricKind::Scale,
        direction: MetricDirection::HigherIsBetter,
    },
    MetricDefinition {
        key: MetricKey::DataConsistency,
        name: "Data Consistency",
        description: "The degree to which all nodes in a distributed system see the same data at the same time.",
        unit: "scale 1-10",
        kind: MetricKind::Scale,
        direction: MetricDirection::HigherIsBetter,
    },
];

impl MetricKey {
    /// All metrics in catalog order
    pub const ALL: [Self; 8] = [
        Self::Throughput,
        Self::Latency,
        Self::Availability,
        Self::ResourceUtilization,
        Self::FaultTolerance,
        Self::Elasticity,
        Self::CostEfficiency,
        Self::DataConsistency,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Throughput => 0,
            Self::Latency => 1,
            Self::Availability => 2,
            Self::ResourceUtilization => 3,
            Self::FaultTolerance => 4,
            Self::Elasticity => 5,
            Self::CostEfficiency => 6,
            Self::DataConsistency => 7,
        }
    }

    /// Wire name, matching the JSON field name of [`MetricsData`]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Throughput => "throughput",
            Self::Latency => "latency",
            Self::Availability => "availability",
            Self::ResourceUtilization => "resourceUtilization",
            Self::FaultTolerance => "faultTolerance",
            Self::Elasticity => "elasticity",
            Self::CostEfficiency => "costEfficiency",
            Self::DataConsistency => "dataConsistency",
        }
    }

    /// Parse a metric key, accepting camelCase, snake_case and kebab-case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().to_lowercase() == normalized)
    }

    #[must_use]
    pub fn definition(self) -> &'static MetricDefinition {
        &METRIC_DEFINITIONS[self.index()]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.definition().name
    }

    #[must_use]
    pub fn unit(self) -> &'static str {
        self.definition().unit
    }

    #[must_use]
    pub fn kind(self) -> MetricKind {
        self.definition().kind
    }

    #[must_use]
    pub fn direction(self) -> MetricDirection {
        self.definition().direction
    }

    #[must_use]
    pub fn is_lower_better(self) -> bool {
        self.direction() == MetricDirection::LowerIsBetter
    }

    /// Whether a sign-corrected improvement percentage is a gain.
    ///
    /// Improvement percentages already have their sign flipped for
    /// lower-is-better metrics, so a positive value is favorable for every
    /// metric and direction must not be applied a second time.
    #[must_use]
    pub fn is_favorable(self, improvement_pct: f64) -> bool {
        improvement_pct > 0.0
    }

    /// Format a value with the precision appropriate for this metric
    #[must_use]
    pub fn format_value(self, value: f64) -> String {
        match self.kind() {
            MetricKind::Percentage => format!("{value:.1}"),
            MetricKind::Rate | MetricKind::Duration | MetricKind::Scale => {
                if value.fract() == 0.0 {
                    format!("{value:.0}")
                } else {
                    format!("{value:.1}")
                }
            }
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access to the static metric catalog.
pub struct MetricCatalog;

impl MetricCatalog {
    /// All metric definitions in catalog order
    #[must_use]
    pub fn definitions() -> &'static [MetricDefinition] {
        &METRIC_DEFINITIONS
    }

    #[must_use]
    pub fn get(key: MetricKey) -> &'static MetricDefinition {
        key.definition()
    }
}

/// One full set of the eight performance metrics for a single pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsData {
    /// Requests per second
    pub throughput: f64,
    /// Milliseconds
    pub latency: f64,
    /// Percentage
    pub availability: f64,
    /// Percentage
    pub resource_utilization: f64,
    /// Scale 1-10
    pub fault_tolerance: f64,
    /// Scale 1-10
    pub elasticity: f64,
    /// Scale 1-10
    pub cost_efficiency: f64,
    /// Scale 1-10
    pub data_consistency: f64,
}

fn check_value(key: MetricKey, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ArchScaleError::invalid_input(format!(
            "metric '{key}' is not a finite number ({value})"
        )));
    }
    let (min, max) = key.kind().bounds();
    if value < min {
        return Err(ArchScaleError::invalid_input(format!(
            "metric '{key}' value {value} is below the minimum of {min}"
        )));
    }
    if value > max {
        return Err(ArchScaleError::invalid_input(format!(
            "metric '{key}' value {value} is above the maximum of {max}"
        )));
    }
    Ok(())
}

impl MetricsData {
    /// Build a snapshot by evaluating `f` for every metric.
    pub fn from_fn(mut f: impl FnMut(MetricKey) -> f64) -> Self {
        Self {
            throughput: f(MetricKey::Throughput),
            latency: f(MetricKey::Latency),
            availability: f(MetricKey::Availability),
            resource_utilization: f(MetricKey::ResourceUtilization),
            fault_tolerance: f(MetricKey::FaultTolerance),
            elasticity: f(MetricKey::Elasticity),
            cost_efficiency: f(MetricKey::CostEfficiency),
            data_consistency: f(MetricKey::DataConsistency),
        }
    }

    #[must_use]
    pub const fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Throughput => self.throughput,
            MetricKey::Latency => self.latency,
            MetricKey::Availability => self.availability,
            MetricKey::ResourceUtilization => self.resource_utilization,
            MetricKey::FaultTolerance => self.fault_tolerance,
            MetricKey::Elasticity => self.elasticity,
            MetricKey::CostEfficiency => self.cost_efficiency,
            MetricKey::DataConsistency => self.data_consistency,
        }
    }

    pub fn set(&mut self, key: MetricKey, value: f64) {
        match key {
            MetricKey::Throughput => self.throughput = value,
            MetricKey::Latency => self.latency = value,
            MetricKey::Availability => self.availability = value,
            MetricKey::ResourceUtilization => self.resource_utilization = value,
            MetricKey::FaultTolerance => self.fault_tolerance = value,
            MetricKey::Elasticity => self.elasticity = value,
            MetricKey::CostEfficiency => self.cost_efficiency = value,
            MetricKey::DataConsistency => self.data_consistency = value,
        }
    }

    /// Iterate `(key, value)` pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, f64)> + '_ {
        MetricKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Check that every value is finite, non-negative and within the
    /// bounds of its metric kind.
    pub fn validate(&self) -> Result<()> {
        self.iter()
            .try_for_each(|(key, value)| check_value(key, value))
    }
}

/// Metrics as supplied by a metric source or input file, where any field
/// may be absent. Absent fields are never defaulted; see [`Self::complete`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CandidateMetrics {
    pub throughput: Option<f64>,
    pub latency: Option<f64>,
    pub availability: Option<f64>,
    pub resource_utilization: Option<f64>,
    pub fault_tolerance: Option<f64>,
    pub elasticity: Option<f64>,
    pub cost_efficiency: Option<f64>,
    pub data_consistency: Option<f64>,
}

impl CandidateMetrics {
    #[must_use]
    pub const fn get(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::Throughput => self.throughput,
            MetricKey::Latency => self.latency,
            MetricKey::Availability => self.availability,
            MetricKey::ResourceUtilization => self.resource_utilization,
            MetricKey::FaultTolerance => self.fault_tolerance,
            MetricKey::Elasticity => self.elasticity,
            MetricKey::CostEfficiency => self.cost_efficiency,
            MetricKey::DataConsistency => self.data_consistency,
        }
    }

    /// Copy of these metrics with one field cleared
    #[must_use]
    pub fn without(mut self, key: MetricKey) -> Self {
        match key {
            MetricKey::Throughput => self.throughput = None,
            MetricKey::Latency => self.latency = None,
            MetricKey::Availability => self.availability = None,
            MetricKey::ResourceUtilization => self.resource_utilization = None,
            MetricKey::FaultTolerance => self.fault_tolerance = None,
            MetricKey::Elasticity => self.elasticity = None,
            MetricKey::CostEfficiency => self.cost_efficiency = None,
            MetricKey::DataConsistency => self.data_consistency = None,
        }
        self
    }

    /// First metric that has no value, in catalog order
    #[must_use]
    pub fn first_missing(&self) -> Option<MetricKey> {
        MetricKey::ALL.into_iter().find(|key| self.get(*key).is_none())
    }

    /// Check the values that are present against their metric bounds.
    /// Absent fields are not an error here.
    pub fn validate_present(&self) -> Result<()> {
        MetricKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
            .try_for_each(|(key, value)| check_value(key, value))
    }

    /// Turn this candidate into a full, validated snapshot.
    ///
    /// Returns `MissingMetric` naming `pattern` if any field is absent and
    /// `InvalidInput` if a present value breaks the snapshot invariant.
    pub fn complete(&self, pattern: &str) -> Result<MetricsData> {
        if let Some(missing) = self.first_missing() {
            return Err(ArchScaleError::missing_metric(pattern, missing));
        }
        let data = MetricsData::from_fn(|key| self.get(key).unwrap_or(f64::NAN));
        data.validate().map_err(|e| match e {
            ArchScaleError::InvalidInput(msg) => {
                ArchScaleError::invalid_input(format!("pattern '{pattern}': {msg}"))
            }
            other => other,
        })?;
        Ok(data)
    }
}

impl From<MetricsData> for CandidateMetrics {
    fn from(data: MetricsData) -> Self {
        Self {
            throughput: Some(data.throughput),
            latency: Some(data.latency),
            availability: Some(data.availability),
            resource_utilization: Some(data.resource_utilization),
            fault_tolerance: Some(data.fault_tolerance),
            elasticity: Some(data.elasticity),
            cost_efficiency: Some(data.cost_efficiency),
            data_consistency: Some(data.data_consistency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MetricsData {
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

    #[test]
    fn test_catalog_order_matches_keys() {
        for (def, key) in MetricCatalog::definitions().iter().zip(MetricKey::ALL) {
            assert_eq!(def.key, key);
        }
    }

    #[test]
    fn test_lower_is_better_metrics() {
        let lower: Vec<_> = MetricKey::ALL
            .into_iter()
            .filter(|k| k.is_lower_better())
            .collect();
        assert_eq!(lower, vec![MetricKey::Latency, MetricKey::ResourceUtilization]);
    }

    #[test]
    fn test_parse_accepts_case_variants() {
        assert_eq!(
            MetricKey::parse("resourceUtilization"),
            Some(MetricKey::ResourceUtilization)
        );
        assert_eq!(
            MetricKey::parse("resource_utilization"),
            Some(MetricKey::ResourceUtilization)
        );
        assert_eq!(MetricKey::parse("fault-tolerance"), Some(MetricKey::FaultTolerance));
        assert_eq!(MetricKey::parse("speed"), None);
    }

    #[test]
    fn test_is_favorable_uses_sign_only() {
        // Latency deltas are already sign-corrected: +48% means it dropped.
        assert!(MetricKey::Latency.is_favorable(48.57));
        assert!(!MetricKey::Latency.is_favorable(-12.0));
        assert!(MetricKey::Throughput.is_favorable(250.0));
        assert!(!MetricKey::Throughput.is_favorable(0.0));
    }

    #[test]
    fn test_metrics_json_uses_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["resourceUtilization"], 65.0);
        assert_eq!(json["dataConsistency"], 7.0);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut data = sample();
        data.latency = f64::NAN;
        assert!(matches!(
            data.validate(),
            Err(ArchScaleError::InvalidInput(_))
        ));

        let mut data = sample();
        data.throughput = f64::INFINITY;
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        let mut data = sample();
        data.availability = 100.5;
        assert!(data.validate().is_err());

        let mut data = sample();
        data.elasticity = 0.0;
        assert!(data.validate().is_err());

        let mut data = sample();
        data.throughput = -1.0;
        assert!(data.validate().is_err());

        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_candidate_complete_reports_missing_field() {
        let candidate = CandidateMetrics::from(sample()).without(MetricKey::CostEfficiency);
        match candidate.complete("soa") {
            Err(ArchScaleError::MissingMetric { pattern, metric }) => {
                assert_eq!(pattern, "soa");
                assert_eq!(metric, MetricKey::CostEfficiency);
            }
            other => panic!("Expected MissingMetric, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_present_skips_absent_fields() {
        let partial = CandidateMetrics {
            availability: Some(99.0),
            ..CandidateMetrics::default()
        };
        assert!(partial.validate_present().is_ok());

        let over = CandidateMetrics {
            availability: Some(101.0),
            ..partial
        };
        assert!(over.validate_present().is_err());
    }

    #[test]
    fn test_candidate_deserialize_rejects_unknown_fields() {
        let json = r#"{"throughput": 10, "speed": 3}"#;
        assert!(serde_json::from_str::<CandidateMetrics>(json).is_err());

        let json = r#"{"throughput": 10}"#;
        let candidate: CandidateMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.throughput, Some(10.0));
        assert_eq!(candidate.first_missing(), Some(MetricKey::Latency));
    }

    #[test]
    fn test_format_value_precision() {
        assert_eq!(MetricKey::Throughput.format_value(2800.0), "2800");
        assert_eq!(MetricKey::Availability.format_value(99.8), "99.8");
        assert_eq!(MetricKey::Availability.format_value(100.0), "100.0");
    }
}
