use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::score::compute_total;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub target_user_id: Uuid,
    pub rater_user_id: Uuid,
    pub trust_score: f64,
    pub engagement_score: f64,
    pub experience_score: f64,
    pub total_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a rating. An absent field keeps the stored value.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingUpdate {
    pub trust_score: Option<f64>,
    pub engagement_score: Option<f64>,
    pub experience_score: Option<f64>,
}

impl RatingUpdate {
    /// Merge over an existing rating, returning the resulting
    /// (trust, engagement, experience, total) with the total recomputed
    /// from the full triple.
    pub fn apply_to(&self, current: &Rating) -> (f64, f64, f64, f64) {
        let trust = self.trust_score.unwrap_or(current.trust_score);
        let engagement = self.engagement_score.unwrap_or(current.engagement_score);
        let experience = self.experience_score.unwrap_or(current.experience_score);
        let total = compute_total(trust, engagement, experience);
        (trust, engagement, experience, total)
    }
}

/// On-the-fly view over the raw rating list for a target. Averages are
/// computed from the rows directly, independent of the maintained
/// aggregate, so the two can be cross-checked.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleRatings {
    pub total_ratings: usize,
    pub average_trust_score: f64,
    pub average_engagement_score: f64,
    pub average_experience_score: f64,
    pub average_total_score: f64,
    pub ratings: Vec<Rating>,
}
