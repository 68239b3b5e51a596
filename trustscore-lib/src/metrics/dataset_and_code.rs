//! Dataset and code availability: half a point each for a linked dataset and linked code.

use super::MetricValue;
use crate::Result;
use crate::facts::{GroupFacts, MetadataSource};
use crate::resources::ResourceGroup;

#[must_use]
pub fn score(group: &ResourceGroup) -> f64 {
    let present = |linked: bool| if linked { 0.5 } else { 0.0 };
    present(group.dataset().is_some()) + present(group.code().is_some())
}

#[expect(clippy::unused_async, reason = "shares the signature of the other metrics")]
pub async fn evaluate<S: MetadataSource>(facts: &GroupFacts<S>) -> Result<MetricValue> {
    Ok(MetricValue::Scalar(score(facts.group())))
}
