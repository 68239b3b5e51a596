use strum::{Display, EnumIter, IntoStaticStr};

/// The metrics every resource group is scored on, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MetricName {
    RampUpTime,
    BusFactor,
    PerformanceClaims,
    License,
    SizeScore,
    DatasetAndCodeScore,
    DatasetQuality,
    CodeQuality,
}
