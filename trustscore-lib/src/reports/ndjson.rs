use crate::Result;
use crate::metrics::{DeviceScores, MetricName, MetricOutcome, MetricValue, metric_def};
use crate::resources::ResourceKind;
use crate::scoring::ScoreRecord;
use core::fmt::Write;
use serde::Serialize;

/// One output line. Field order here is the field order on the wire.
#[derive(Debug, Serialize)]
struct Line<'a> {
    name: &'a str,
    category: ResourceKind,
    net_score: f64,
    net_score_latency: u64,
    ramp_up_time: f64,
    ramp_up_time_latency: u64,
    bus_factor: f64,
    bus_factor_latency: u64,
    performance_claims: f64,
    performance_claims_latency: u64,
    license: f64,
    license_latency: u64,
    size_score: DeviceScores,
    size_score_latency: u64,
    dataset_and_code_score: f64,
    dataset_and_code_score_latency: u64,
    dataset_quality: f64,
    dataset_quality_latency: u64,
    code_quality: f64,
    code_quality_latency: u64,
}

/// Write one compact JSON object per record, each terminated by a newline.
pub fn generate<W: Write>(records: &[ScoreRecord], writer: &mut W) -> Result<()> {
    for record in records {
        writeln!(writer, "{}", serde_json::to_string(&line(record))?)?;
    }

    Ok(())
}

fn line(record: &ScoreRecord) -> Line<'_> {
    let ramp_up_time = outcome(record, MetricName::RampUpTime);
    let bus_factor = outcome(record, MetricName::BusFactor);
    let performance_claims = outcome(record, MetricName::PerformanceClaims);
    let license = outcome(record, MetricName::License);
    let size_score = outcome(record, MetricName::SizeScore);
    let dataset_and_code_score = outcome(record, MetricName::DatasetAndCodeScore);
    let dataset_quality = outcome(record, MetricName::DatasetQuality);
    let code_quality = outcome(record, MetricName::CodeQuality);

    Line {
        name: &record.name,
        category: record.category,
        net_score: round3(record.net_score),
        net_score_latency: record.net_score_latency_ms,
        ramp_up_time: scalar(&ramp_up_time),
        ramp_up_time_latency: ramp_up_time.latency_ms,
        bus_factor: scalar(&bus_factor),
        bus_factor_latency: bus_factor.latency_ms,
        performance_claims: scalar(&performance_claims),
        performance_claims_latency: performance_claims.latency_ms,
        license: scalar(&license),
        license_latency: license.latency_ms,
        size_score: per_device(&size_score),
        size_score_latency: size_score.latency_ms,
        dataset_and_code_score: scalar(&dataset_and_code_score),
        dataset_and_code_score_latency: dataset_and_code_score.latency_ms,
        dataset_quality: scalar(&dataset_quality),
        dataset_quality_latency: dataset_quality.latency_ms,
        code_quality: scalar(&code_quality),
        code_quality_latency: code_quality.latency_ms,
    }
}

fn outcome(record: &ScoreRecord, name: MetricName) -> MetricOutcome {
    record
        .outcome(name)
        .copied()
        .unwrap_or_else(|| MetricOutcome::failed(metric_def(name).failure_value, 0))
}

fn scalar(outcome: &MetricOutcome) -> f64 {
    round3(outcome.value.scalar())
}

fn per_device(outcome: &MetricOutcome) -> DeviceScores {
    match outcome.value {
        MetricValue::PerDevice(scores) => scores.map(round3),
        MetricValue::Scalar(v) => DeviceScores::from_fn(|_| round3(v)),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
