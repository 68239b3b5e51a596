use super::{DeviceScores, MetricName, MetricValue};

#[derive(Debug)]
pub struct MetricDef {
    pub name: MetricName,
    pub description: &'static str,

    /// Contribution to the net score; all weights sum to 1
    pub weight: f64,

    /// Value reported when the metric fails or times out
    pub failure_value: MetricValue,
}

macro_rules! metric_def {
    ($name:ident, $description:expr, $weight:expr) => {
        metric_def!($name, $description, $weight, MetricValue::Scalar(0.0))
    };
    ($name:ident, $description:expr, $weight:expr, $failure:expr) => {
        MetricDef {
            name: MetricName::$name,
            description: $description,
            weight: $weight,
            failure_value: $failure,
        }
    };
}

/// Every metric, in report order
pub const METRIC_DEFINITIONS: &[MetricDef] = &[
    metric_def!(RampUpTime, "How quickly a newcomer can start using the model, judged from its README", 0.20),
    metric_def!(BusFactor, "How many people keep the project alive, and how recently they did", 0.10),
    metric_def!(PerformanceClaims, "Whether the model's quality claims are backed by benchmarks, results or papers", 0.05),
    metric_def!(License, "How permissive the declared license is", 0.20),
    metric_def!(
        SizeScore,
        "How well the model's weights fit each class of deployment hardware",
        0.10,
        MetricValue::PerDevice(DeviceScores::ZERO)
    ),
    metric_def!(DatasetAndCodeScore, "Whether a training dataset and source code are linked", 0.15),
    metric_def!(DatasetQuality, "How widely used the linked dataset is", 0.10),
    metric_def!(CodeQuality, "Whether the linked code has tests, continuous integration and linting", 0.10),
];

/// Look up the definition of a metric.
#[must_use]
pub const fn metric_def(name: MetricName) -> &'static MetricDef {
    // definitions are stored in declaration order of `MetricName`
    &METRIC_DEFINITIONS[name as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_metric_defined_once_in_order() {
        let names: Vec<_> = METRIC_DEFINITIONS.iter().map(|d| d.name).collect();
        let expected: Vec<_> = MetricName::iter().collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = METRIC_DEFINITIONS.iter().map(|d| d.weight).sum();
        assert!((total - 1.0).abs() < 1e-9, "weights sum to {total}");
    }

    #[test]
    fn test_lookup() {
        for name in MetricName::iter() {
            assert_eq!(metric_def(name).name, name);
        }
        assert_eq!(metric_def(MetricName::License).weight, 0.20);
    }

    #[test]
    fn test_size_fails_per_device() {
        assert_eq!(
            metric_def(MetricName::SizeScore).failure_value,
            MetricValue::PerDevice(DeviceScores::ZERO)
        );
    }
}
