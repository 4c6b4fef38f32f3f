//! Before/after deltas and best-per-metric lookup.

use crate::error::{ArchScaleError, Result};
use crate::model::{ComparisonResult, ImprovementPercentages, MetricKey, MetricsData, PatternMetrics};
use indexmap::IndexMap;

/// Percentage change from `before` to `after` for every metric.
///
/// Lower-is-better metrics are sign-flipped, so a positive percentage is
/// always an improvement. A zero `before` value has no defined percentage
/// change and is rejected.
pub fn improvement_percentages(
    before: &MetricsData,
    after: &MetricsData,
) -> Result<ImprovementPercentages> {
    before.validate()?;
    after.validate()?;

    let mut pct = ImprovementPercentages::default();
    for key in MetricKey::ALL {
        let b = before.get(key);
        let a = after.get(key);
        if b == 0.0 {
            return Err(ArchScaleError::invalid_input(format!(
                "before value of '{key}' is zero, percentage change is undefined"
            )));
        }
        let change = (a - b) / b * 100.0;
        let signed = if key.is_lower_better() { -change } else { change };
        // normalizes -0.0 so unchanged metrics print as 0
        pct.insert(key, signed + 0.0);
    }
    Ok(pct)
}

/// Build a full comparison between two snapshots.
pub fn compare(
    before: &MetricsData,
    after: &MetricsData,
    pattern_used: impl Into<String>,
) -> Result<ComparisonResult> {
    let improvement_percentages = improvement_percentages(before, after)?;
    Ok(ComparisonResult {
        before_scaling: *before,
        after_scaling: *after,
        pattern_used: pattern_used.into(),
        improvement_percentages,
    })
}

/// Best observed value per metric across patterns: the minimum for
/// lower-is-better metrics, the maximum otherwise.
#[must_use]
pub fn best_values(rows: &[PatternMetrics]) -> Option<IndexMap<MetricKey, f64>> {
    if rows.is_empty() {
        return None;
    }
    let best = MetricKey::ALL
        .into_iter()
        .map(|key| {
            let values = rows.iter().map(|r| r.metrics.get(key));
            let value = if key.is_lower_better() {
                values.fold(f64::INFINITY, f64::min)
            } else {
                values.fold(f64::NEG_INFINITY, f64::max)
            };
            (key, value)
        })
        .collect();
    Some(best)
}
