use super::MetricValue;

/// How a metric evaluation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Computed,
    Failed,
    TimedOut,
}

/// A metric's value together with the time spent producing it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricOutcome {
    pub value: MetricValue,
    pub latency_ms: u64,
    pub status: OutcomeStatus,
}

impl MetricOutcome {
    #[must_use]
    pub fn computed(value: MetricValue, latency_ms: u64) -> Self {
        Self {
            value: value.clamped(),
            latency_ms,
            status: OutcomeStatus::Computed,
        }
    }

    #[must_use]
    pub const fn failed(failure_value: MetricValue, latency_ms: u64) -> Self {
        Self {
            value: failure_value,
            latency_ms,
            status: OutcomeStatus::Failed,
        }
    }

    #[must_use]
    pub const fn timed_out(failure_value: MetricValue, latency_ms: u64) -> Self {
        Self {
            value: failure_value,
            latency_ms,
            status: OutcomeStatus::TimedOut,
        }
    }
}
