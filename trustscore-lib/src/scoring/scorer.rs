use super::{ScoreRecord, net_score};
use crate::facts::{GroupFacts, MetadataSource};
use crate::metrics::{self, METRIC_DEFINITIONS, MetricDef, MetricOutcome};
use crate::resources::{ResourceGroup, ResourceKind};
use chrono::{DateTime, Utc};
use core::time::Duration;
use futures_util::StreamExt;
use futures_util::future::join_all;
use futures_util::stream;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::Instant;

const LOG_TARGET: &str = "    scorer";

/// Limits applied while scoring
#[derive(Debug, Clone, Copy)]
pub struct ScorerOptions {
    /// Budget for a single metric evaluation, including every fetch it waits on
    pub metric_timeout: Duration,

    /// Groups scored at the same time
    pub max_concurrent_groups: usize,

    /// Metric evaluations in flight at the same time, across all groups
    pub max_concurrent_metrics: usize,
}

/// Runs every metric against resource groups and aggregates the results.
#[derive(Debug)]
pub struct Scorer<S> {
    source: Arc<S>,
    options: ScorerOptions,
    metric_slots: Arc<Semaphore>,
}

impl<S: MetadataSource> Scorer<S> {
    #[must_use]
    pub fn new(source: Arc<S>, options: ScorerOptions) -> Self {
        Self {
            source,
            metric_slots: Arc::new(Semaphore::new(options.max_concurrent_metrics.max(1))),
            options,
        }
    }

    /// Score every group, returning the records in the same order as the groups.
    pub async fn score_all(&self, groups: Vec<ResourceGroup>, now: DateTime<Utc>) -> Vec<ScoreRecord> {
        log::info!(target: LOG_TARGET, "Scoring {} resource group(s)", groups.len());

        stream::iter(groups)
            .map(|group| self.score_group(group, now))
            .buffered(self.options.max_concurrent_groups.max(1))
            .collect()
            .await
    }

    /// Score a single group.
    ///
    /// Every metric runs as its own task. The record is assembled once all of them have
    /// settled; a metric that fails, panics or runs out of time reports its failure value.
    pub async fn score_group(&self, group: ResourceGroup, now: DateTime<Utc>) -> ScoreRecord {
        let started = Instant::now();
        let name = group.model().display_name().to_string();
        let line = group.line();
        let facts = Arc::new(GroupFacts::new(Arc::clone(&self.source), group, now));

        let tasks = METRIC_DEFINITIONS.iter().map(|def| {
            tokio::spawn(run_metric(
                def,
                Arc::clone(&facts),
                Arc::clone(&self.metric_slots),
                self.options.metric_timeout,
            ))
        });

        let outcomes: Vec<_> = METRIC_DEFINITIONS
            .iter()
            .zip(join_all(tasks).await)
            .map(|(def, joined)| {
                let outcome = joined.unwrap_or_else(|e| {
                    log::error!(target: LOG_TARGET, "Metric '{}' for '{name}' did not complete: {e}", def.name);
                    MetricOutcome::failed(def.failure_value, elapsed_ms(started))
                });
                (def.name, outcome)
            })
            .collect();

        let net_score = net_score(outcomes.iter().map(|(name, outcome)| (*name, outcome.value)));
        let latency = elapsed_ms(started);
        log::info!(target: LOG_TARGET, "Scored '{name}' (line {line}) in {latency}ms: net score {net_score:.3}");

        ScoreRecord::new(name, ResourceKind::Model, line, net_score, latency, outcomes)
    }
}

async fn run_metric<S: MetadataSource>(
    def: &'static MetricDef,
    facts: Arc<GroupFacts<S>>,
    slots: Arc<Semaphore>,
    timeout: Duration,
) -> MetricOutcome {
    // a closed semaphore only means we run unbounded
    let _slot = slots.acquire_owned().await.ok();
    let started = Instant::now();

    match tokio::time::timeout(timeout, metrics::evaluate(def.name, &facts)).await {
        Ok(Ok(value)) => {
            log::debug!(target: LOG_TARGET, "Metric '{}' for '{}' computed", def.name, facts.group().model());
            MetricOutcome::computed(value, elapsed_ms(started))
        }
        Ok(Err(e)) => {
            log::warn!(target: LOG_TARGET, "Metric '{}' for '{}' failed: {e:#}", def.name, facts.group().model());
            log::debug!(target: LOG_TARGET, "'{}' falls back to its failure value; it measures: {}", def.name, def.description);
            MetricOutcome::failed(def.failure_value, elapsed_ms(started))
        }
        Err(_) => {
            log::warn!(
                target: LOG_TARGET,
                "Metric '{}' for '{}' timed out after {}ms",
                def.name,
                facts.group().model(),
                duration_ms(timeout)
            );
            MetricOutcome::timed_out(def.failure_value, duration_ms(timeout))
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    duration_ms(started.elapsed())
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
