//! Ramp-up time: how quickly a newcomer can start using a model, judged from its README.
//!
//! Half of the score comes from documentation length, saturating at
//! [`FULL_LENGTH_WORDS`]. A quarter each comes from usage examples and from
//! quick-start or installation instructions.

use super::{MetricValue, readme};
use crate::Result;
use crate::facts::{GroupFacts, MetadataSource};
use regex::Regex;
use std::sync::LazyLock;

/// README length at which the length component saturates
pub const FULL_LENGTH_WORDS: usize = 300;

const LENGTH_WEIGHT: f64 = 0.5;
const EXAMPLES_WEIGHT: f64 = 0.25;
const QUICK_START_WEIGHT: f64 = 0.25;

static EXAMPLES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```|\bexamples?\b|\busage\b|\bhow to use\b").expect("invalid regex"));

static QUICK_START_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bquick[\s-]?start\b|\bgetting started\b|\binstallation\b|\bpip install\b|\bfrom_pretrained\b").expect("invalid regex")
});

/// Score a README on its own.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "word counts are capped far below 2^52")]
pub fn score_readme(readme: &str) -> f64 {
    let body = readme::body(readme);
    let words = readme::word_count(readme).min(FULL_LENGTH_WORDS);

    let length = words as f64 / FULL_LENGTH_WORDS as f64;
    let examples = if EXAMPLES_REGEX.is_match(body) { 1.0 } else { 0.0 };
    let quick_start = if QUICK_START_REGEX.is_match(body) { 1.0 } else { 0.0 };

    LENGTH_WEIGHT * length + EXAMPLES_WEIGHT * examples + QUICK_START_WEIGHT * quick_start
}

pub async fn evaluate<S: MetadataSource>(facts: &GroupFacts<S>) -> Result<MetricValue> {
    Ok(MetricValue::Scalar(score_readme(facts.model_readme().await?)))
}
