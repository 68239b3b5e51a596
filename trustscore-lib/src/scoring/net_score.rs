use crate::metrics::{MetricName, MetricValue, clamp_unit, metric_def};

/// Weighted sum of metric values, using each metric's weight from the definition table.
///
/// Per-device values contribute their average. The result is clamped to `[0, 1]`.
#[must_use]
pub fn net_score(values: impl IntoIterator<Item = (MetricName, MetricValue)>) -> f64 {
    clamp_unit(values.into_iter().map(|(name, value)| metric_def(name).weight * value.scalar()).sum())
}
