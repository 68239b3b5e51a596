//! The metrics a resource group is scored on
//!
//! Each metric lives in its own module and exposes the same two layers: pure scoring
//! functions over already-fetched metadata, which carry the thresholds and weights, and an
//! async `evaluate` that pulls what it needs from a [`GroupFacts`] and returns a
//! [`MetricValue`].
//!
//! # Implementation Model
//!
//! Metrics are identified by [`MetricName`]. The static [`METRIC_DEFINITIONS`] table
//! gives each one its description, its net-score weight and the value it reports when
//! it fails, and [`evaluate`] dispatches a name to its implementation. Evaluation never
//! retries or times out on its own; the scorer owns both concerns.

mod bus_factor;
mod code_quality;
mod dataset_and_code;
mod dataset_quality;
mod hardware_profile;
mod license;
mod metric_def;
mod metric_name;
mod metric_outcome;
mod metric_value;
mod performance_claims;
mod ramp_up_time;
mod readme;
mod size;

pub use hardware_profile::{DeviceScores, HardwareProfile};
pub use license::LicenseClass;
pub use metric_def::{METRIC_DEFINITIONS, MetricDef, metric_def};
pub use metric_name::MetricName;
pub use metric_outcome::{MetricOutcome, OutcomeStatus};
pub use metric_value::{MetricValue, clamp_unit};

use crate::Result;
use crate::facts::{GroupFacts, MetadataSource};

/// Compute one metric for one resource group.
///
/// # Errors
///
/// Returns an error when the metadata the metric depends on cannot be fetched.
pub async fn evaluate<S: MetadataSource>(name: MetricName, facts: &GroupFacts<S>) -> Result<MetricValue> {
    match name {
        MetricName::RampUpTime => ramp_up_time::evaluate(facts).await,
        MetricName::BusFactor => bus_factor::evaluate(facts).await,
        MetricName::PerformanceClaims => performance_claims::evaluate(facts).await,
        MetricName::License => license::evaluate(facts).await,
        MetricName::SizeScore => size::evaluate(facts).await,
        MetricName::DatasetAndCodeScore => dataset_and_code::evaluate(facts).await,
        MetricName::DatasetQuality => dataset_quality::evaluate(facts).await,
        MetricName::CodeQuality => code_quality::evaluate(facts).await,
    }
}
