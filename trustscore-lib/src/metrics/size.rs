//! Size: how well a model's weights fit each class of deployment hardware.
//!
//! Repositories often ship the same weights in several formats; the download a user
//! actually needs is the smallest of the per-format totals. Above a profile's
//! comfortable size the score falls linearly, reaching 0 at eleven times that size.

use super::{DeviceScores, HardwareProfile, MetricValue};
use crate::Result;
use crate::facts::{GroupFacts, MetadataSource, RepoFile};
use std::collections::BTreeMap;

/// File extensions holding model weights
const WEIGHT_EXTENSIONS: &[&str] = &["safetensors", "bin", "pt", "pth", "h5", "ckpt", "onnx", "gguf", "msgpack", "tflite"];

/// How many multiples of the comfortable size it takes for the score to fall from 1 to 0
const DECAY_SPAN: f64 = 10.0;

/// Scores when no weight file sizes are known: assume only large machines will cope
pub const UNKNOWN_SIZE_SCORES: DeviceScores = DeviceScores {
    raspberry_pi: 0.0,
    jetson_nano: 0.0,
    desktop_pc: 1.0,
    aws_server: 1.0,
};

fn weight_format(path: &str) -> Option<&'static str> {
    let (_, ext) = path.rsplit_once('.')?;
    WEIGHT_EXTENSIONS.iter().copied().find(|known| known.eq_ignore_ascii_case(ext))
}

/// Total weight bytes of the smallest format present, or `None` when no sizes are known.
#[must_use]
pub fn weight_bytes(files: &[RepoFile]) -> Option<u64> {
    let mut per_format: BTreeMap<&str, u64> = BTreeMap::new();

    for file in files {
        if let (Some(format), Some(size)) = (weight_format(&file.path), file.size) {
            let total = per_format.entry(format).or_default();
            *total = total.saturating_add(size);
        }
    }

    per_format.into_values().filter(|&total| total > 0).min()
}

#[expect(clippy::cast_precision_loss, reason = "byte counts only need to be approximate here")]
fn profile_score(total_bytes: u64, profile: HardwareProfile) -> f64 {
    let comfortable = profile.comfortable_bytes();
    if total_bytes <= comfortable {
        return 1.0;
    }

    let excess = (total_bytes - comfortable) as f64;
    (1.0 - excess / (DECAY_SPAN * comfortable as f64)).max(0.0)
}

#[must_use]
pub fn score_files(files: &[RepoFile]) -> DeviceScores {
    weight_bytes(files).map_or(UNKNOWN_SIZE_SCORES, |total| DeviceScores::from_fn(|p| profile_score(total, p)))
}

pub async fn evaluate<S: MetadataSource>(facts: &GroupFacts<S>) -> Result<MetricValue> {
    let info = facts.model_info().await?;
    Ok(MetricValue::PerDevice(score_files(&info.files)))
}
