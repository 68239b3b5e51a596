use super::DeviceScores;

/// The value a metric produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// A single score in `[0, 1]`
    Scalar(f64),

    /// One score in `[0, 1]` per hardware profile
    PerDevice(DeviceScores),
}

impl MetricValue {
    /// The value as a single number: per-device scores contribute their average.
    #[must_use]
    pub fn scalar(&self) -> f64 {
        match self {
            Self::Scalar(v) => *v,
            Self::PerDevice(scores) => scores.average(),
        }
    }

    /// The value with every score forced into `[0, 1]`.
    #[must_use]
    pub fn clamped(&self) -> Self {
        match self {
            Self::Scalar(v) => Self::Scalar(clamp_unit(*v)),
            Self::PerDevice(scores) => Self::PerDevice(scores.map(clamp_unit)),
        }
    }
}

/// Force a score into `[0, 1]`; NaN becomes 0.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
