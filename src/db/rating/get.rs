use sqlx::PgConnection;
use uuid::Uuid;

use crate::{errors::AppError, models::Rating};

pub async fn get_rating(
    conn: &mut PgConnection,
    target_user_id: Uuid,
    rater_user_id: Uuid,
) -> Result<Option<Rating>, AppError> {
    sqlx::query_as::<_, Rating>(
        "SELECT target_user_id, rater_user_id, trust_score, engagement_score,
                experience_score, total_score, created_at, updated_at
        FROM ratings
        WHERE target_user_id = $1 AND rater_user_id = $2",
    )
    .bind(target_user_id)
    .bind(rater_user_id)
    .fetch_optional(conn)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch rating: {}", e)))
}

pub async fn get_ratings_for_target(
    conn: &mut PgConnection,
    target_user_id: Uuid,
) -> Result<Vec<Rating>, AppError> {
    sqlx::query_as::<_, Rating>(
        "SELECT target_user_id, rater_user_id, trust_score, engagement_score,
                experience_score, total_score, created_at, updated_at
        FROM ratings
        WHERE target_user_id = $1
        ORDER BY updated_at DESC, rater_user_id ASC",
    )
    .bind(target_user_id)
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch ratings for target: {}", e)))
}

pub async fn get_ratings_by_rater(
    conn: &mut PgConnection,
    rater_user_id: Uuid,
) -> Result<Vec<Rating>, AppError> {
    sqlx::query_as::<_, Rating>(
        "SELECT target_user_id, rater_user_id, trust_score, engagement_score,
                experience_score, total_score, created_at, updated_at
        FROM ratings
        WHERE rater_user_id = $1
        ORDER BY updated_at DESC, target_user_id ASC",
    )
    .bind(rater_user_id)
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch ratings by rater: {}", e)))
}
