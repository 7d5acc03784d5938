use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::rating::Rating;
use crate::score::round2;

/// Materialized per-target summary over all ratings where the user is the
/// target. Written only by the aggregate recompute, always as a full-row
/// replace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRatingAggregate {
    pub target_user_id: Uuid,
    pub average_trust_score: f64,
    pub median_trust_score: f64,
    pub average_engagement_score: f64,
    pub median_engagement_score: f64,
    pub average_experience_score: f64,
    pub median_experience_score: f64,
    pub average_total_score: f64,
    pub median_total_score: f64,
    pub min_total_score: f64,
    pub max_total_score: f64,
    pub total_ratings_count: i64,
    pub last_updated: DateTime<Utc>,
}

impl UserRatingAggregate {
    /// Well-defined "no data" stats for a target with no ratings.
    pub fn empty(target_user_id: Uuid) -> Self {
        Self {
            target_user_id,
            average_trust_score: 0.0,
            median_trust_score: 0.0,
            average_engagement_score: 0.0,
            median_engagement_score: 0.0,
            average_experience_score: 0.0,
            median_experience_score: 0.0,
            average_total_score: 0.0,
            median_total_score: 0.0,
            min_total_score: 0.0,
            max_total_score: 0.0,
            total_ratings_count: 0,
            last_updated: Utc::now(),
        }
    }
}

/// The statistical core of an aggregate row, derived from the full current
/// rating set for one target. Pure: same ratings in, same snapshot out.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSnapshot {
    pub average_trust_score: f64,
    pub median_trust_score: f64,
    pub average_engagement_score: f64,
    pub median_engagement_score: f64,
    pub average_experience_score: f64,
    pub median_experience_score: f64,
    pub average_total_score: f64,
    pub median_total_score: f64,
    pub min_total_score: f64,
    pub max_total_score: f64,
    pub total_ratings_count: i64,
}

impl AggregateSnapshot {
    /// Returns `None` for an empty rating set; the caller deletes the
    /// aggregate row in that case.
    pub fn from_ratings(ratings: &[Rating]) -> Option<Self> {
        if ratings.is_empty() {
            return None;
        }

        let trust: Vec<f64> = ratings.iter().map(|r| r.trust_score).collect();
        let engagement: Vec<f64> = ratings.iter().map(|r| r.engagement_score).collect();
        let experience: Vec<f64> = ratings.iter().map(|r| r.experience_score).collect();
        let total: Vec<f64> = ratings.iter().map(|r| r.total_score).collect();

        // Min/max are taken from the stored totals as-is, unrounded.
        let min_total_score = total.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_total_score = total.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            average_trust_score: mean(&trust),
            median_trust_score: median(&trust),
            average_engagement_score: mean(&engagement),
            median_engagement_score: median(&engagement),
            average_experience_score: mean(&experience),
            median_experience_score: median(&experience),
            average_total_score: mean(&total),
            median_total_score: median(&total),
            min_total_score,
            max_total_score,
            total_ratings_count: ratings.len() as i64,
        })
    }
}

/// Arithmetic mean rounded to 2 decimals. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round2(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median rounded to 2 decimals: middle element for an odd count, mean of
/// the two middle elements for an even count. Returns 0.0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    };
    round2(median)
}

/// Observed min/max per axis, scanned from the current rating set.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRanges {
    pub trust: ScoreRange,
    pub engagement: ScoreRange,
    pub experience: ScoreRange,
    pub total: ScoreRange,
}

impl ScoreRanges {
    /// Zeroed ranges for an empty rating set.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        if ratings.is_empty() {
            return Self::default();
        }

        let range = |values: &mut dyn Iterator<Item = f64>| {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for v in values {
                min = min.min(v);
                max = max.max(v);
            }
            ScoreRange { min, max }
        };

        Self {
            trust: range(&mut ratings.iter().map(|r| r.trust_score)),
            engagement: range(&mut ratings.iter().map(|r| r.engagement_score)),
            experience: range(&mut ratings.iter().map(|r| r.experience_score)),
            total: range(&mut ratings.iter().map(|r| r.total_score)),
        }
    }
}

/// Aggregate stats plus the per-axis ranges and the most recent ratings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedStats {
    pub aggregate: UserRatingAggregate,
    pub score_ranges: ScoreRanges,
    pub recent_ratings: Vec<Rating>,
}
