use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

use crate::models::aggregate::UserRatingAggregate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderBoardEntry {
    pub target_user_id: Uuid,
    pub average_total_score: f64,
    pub median_total_score: f64,
    pub total_ratings_count: i64,
    pub rank: u64,
}

/// Descending by average total score; equal averages order by target user id
/// ascending so the leaderboard is deterministic.
pub fn leaderboard_order(a: &UserRatingAggregate, b: &UserRatingAggregate) -> Ordering {
    b.average_total_score
        .partial_cmp(&a.average_total_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.target_user_id.cmp(&b.target_user_id))
}

/// Sort the aggregate rows, keep the top `limit`, and assign 1-based ranks.
pub fn build_leaderboard(
    mut aggregates: Vec<UserRatingAggregate>,
    limit: usize,
) -> Vec<LeaderBoardEntry> {
    aggregates.sort_by(leaderboard_order);
    aggregates.truncate(limit);

    aggregates
        .into_iter()
        .enumerate()
        .map(|(index, aggregate)| LeaderBoardEntry {
            target_user_id: aggregate.target_user_id,
            average_total_score: aggregate.average_total_score,
            median_total_score: aggregate.median_total_score,
            total_ratings_count: aggregate.total_ratings_count,
            rank: (index + 1) as u64,
        })
        .collect()
}
