use sqlx::PgConnection;
use uuid::Uuid;

use crate::{errors::AppError, models::aggregate::UserRatingAggregate};

const AGGREGATE_COLUMNS: &str = "target_user_id, average_trust_score, median_trust_score,
    average_engagement_score, median_engagement_score, average_experience_score,
    median_experience_score, average_total_score, median_total_score,
    min_total_score, max_total_score, total_ratings_count, last_updated";

pub async fn get_aggregate(
    conn: &mut PgConnection,
    target_user_id: Uuid,
) -> Result<Option<UserRatingAggregate>, AppError> {
    sqlx::query_as::<_, UserRatingAggregate>(&format!(
        "SELECT {AGGREGATE_COLUMNS} FROM user_rating_aggregates WHERE target_user_id = $1"
    ))
    .bind(target_user_id)
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch aggregate: {}", e)))
}

pub async fn get_all_aggregates(
    conn: &mut PgConnection,
) -> Result<Vec<UserRatingAggregate>, AppError> {
    sqlx::query_as::<_, UserRatingAggregate>(&format!(
        "SELECT {AGGREGATE_COLUMNS} FROM user_rating_aggregates"
    ))
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch aggregates: {}", e)))
}
