use crate::metrics::{MetricName, MetricOutcome};
use crate::resources::ResourceKind;

/// Everything known about one scored resource group
///
/// Values are kept at full precision; rounding happens when a report is written.
#[derive(Debug, Clone)]
pub struct ScoreRecord {
    /// Display name of the model
    pub name: String,
    pub category: ResourceKind,

    /// Input line the group came from
    pub line: usize,
    pub net_score: f64,

    /// Wall-clock time spent scoring the whole group
    pub net_score_latency_ms: u64,

    outcomes: Vec<(MetricName, MetricOutcome)>,
}

impl ScoreRecord {
    #[must_use]
    pub const fn new(
        name: String,
        category: ResourceKind,
        line: usize,
        net_score: f64,
        net_score_latency_ms: u64,
        outcomes: Vec<(MetricName, MetricOutcome)>,
    ) -> Self {
        Self {
            name,
            category,
            line,
            net_score,
            net_score_latency_ms,
            outcomes,
        }
    }

    /// Outcome of one metric, if it was run
    #[must_use]
    pub fn outcome(&self, name: MetricName) -> Option<&MetricOutcome> {
        self.outcomes.iter().find(|(n, _)| *n == name).map(|(_, outcome)| outcome)
    }

    /// Every metric outcome, in evaluation order
    pub fn outcomes(&self) -> impl Iterator<Item = (MetricName, &MetricOutcome)> {
        self.outcomes.iter().map(|(name, outcome)| (*name, outcome))
    }
}
