//! Dataset quality: how widely used the linked dataset is, bucketed on a log scale of
//! download counts. A group without a linked dataset scores 0.

use super::MetricValue;
use crate::Result;
use crate::facts::{GroupFacts, MetadataSource};

/// Minimum download count for each score, highest first
const DOWNLOAD_BUCKETS: &[(u64, f64)] = &[
    (1_000_000, 1.0),
    (100_000, 0.8),
    (10_000, 0.6),
    (1_000, 0.4),
    (100, 0.2),
    (1, 0.1),
];

#[must_use]
pub fn score_downloads(downloads: u64) -> f64 {
    DOWNLOAD_BUCKETS
        .iter()
        .find(|(min, _)| downloads >= *min)
        .map_or(0.0, |(_, score)| *score)
}

pub async fn evaluate<S: MetadataSource>(facts: &GroupFacts<S>) -> Result<MetricValue> {
    let score = facts.dataset_info().await?.map_or(0.0, |info| score_downloads(info.downloads));
    Ok(MetricValue::Scalar(score))
}
