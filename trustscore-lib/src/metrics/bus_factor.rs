//! Bus factor: how many people keep the project alive, and how recently they worked on it.
//!
//! Activity comes from the linked code repository when there is one, otherwise from the
//! model's own commit history on the hub.

use super::MetricValue;
use crate::Result;
use crate::facts::{Activity, GroupFacts, MetadataSource};
use chrono::{DateTime, Utc};

/// Contributor count at which the contributor component saturates
pub const SATURATION_CONTRIBUTORS: u32 = 5;

/// Score given to a project maintained by a single person
const SOLE_MAINTAINER_SCORE: f64 = 0.1;

const CONTRIBUTORS_WEIGHT: f64 = 0.8;
const RECENCY_WEIGHT: f64 = 0.2;

/// Age of the last activity (in days) and the recency score it earns; older is 0.25
const RECENCY_STEPS: &[(i64, f64)] = &[(180, 1.0), (365, 0.75), (730, 0.5)];
const STALE_SCORE: f64 = 0.25;

#[must_use]
pub fn contributor_score(contributors: u64) -> f64 {
    match contributors {
        0 => 0.0,
        1 => SOLE_MAINTAINER_SCORE,
        n => {
            let capped = u32::try_from(n).unwrap_or(u32::MAX).min(SATURATION_CONTRIBUTORS);
            f64::from(capped) / f64::from(SATURATION_CONTRIBUTORS)
        }
    }
}

#[must_use]
pub fn recency_score(last_activity: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(last) = last_activity else {
        return 0.0;
    };

    let age_days = (now - last).num_days();
    RECENCY_STEPS
        .iter()
        .find(|(max_days, _)| age_days <= *max_days)
        .map_or(STALE_SCORE, |(_, score)| *score)
}

#[must_use]
pub fn score_activity(activity: &Activity, now: DateTime<Utc>) -> f64 {
    CONTRIBUTORS_WEIGHT * contributor_score(activity.contributors) + RECENCY_WEIGHT * recency_score(activity.last_activity, now)
}

pub async fn evaluate<S: MetadataSource>(facts: &GroupFacts<S>) -> Result<MetricValue> {
    let activity = facts.activity().await?;
    Ok(MetricValue::Scalar(score_activity(activity, facts.now())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_750_000_000, 0).unwrap()
    }

    #[test]
    fn test_contributor_score() {
        assert_eq!(contributor_score(0), 0.0);
        assert_eq!(contributor_score(1), 0.1);
        assert!((contributor_score(2) - 0.4).abs() < 1e-9);
        assert_eq!(contributor_score(5), 1.0);
        assert_eq!(contributor_score(500), 1.0);
        assert_eq!(contributor_score(u64::MAX), 1.0);
    }

    #[test]
    fn test_recency_score() {
        let now = now();
        assert_eq!(recency_score(None, now), 0.0);
        assert_eq!(recency_score(Some(now + TimeDelta::days(3)), now), 1.0);
        assert_eq!(recency_score(Some(now - TimeDelta::days(10)), now), 1.0);
        assert_eq!(recency_score(Some(now - TimeDelta::days(300)), now), 0.75);
        assert_eq!(recency_score(Some(now - TimeDelta::days(500)), now), 0.5);
        assert_eq!(recency_score(Some(now - TimeDelta::days(2000)), now), 0.25);
    }

    #[test]
    fn test_saturates_for_active_teams() {
        let activity = Activity {
            contributors: 40,
            last_activity: Some(now() - TimeDelta::days(1)),
        };
        assert!((score_activity(&activity, now()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sole_maintainer_long_ago() {
        let activity = Activity {
            contributors: 1,
            last_activity: Some(now() - TimeDelta::days(1000)),
        };
        assert!((score_activity(&activity, now()) - (0.8 * 0.1 + 0.2 * 0.25)).abs() < 1e-9);
    }
}
